//! The client-side state of a logged-in user
//!
//! Components of this crate never read identifiers from some ambient storage: they are given a [`Session`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::BoxError;
use crate::calendar::entry::UserId;


/// Who is using the task service, and where it is
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    api_url: Url,
    user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

impl Session {
    pub fn new(api_url: Url, user_id: UserId) -> Self {
        Self { api_url, user_id, auth_token: None }
    }

    /// A session on the [default API](crate::config::DEFAULT_API_URL)
    pub fn for_user(user_id: UserId) -> Result<Self, BoxError> {
        let api_url = Url::parse(&crate::config::default_api_url())?;
        Ok(Self::new(api_url, user_id))
    }

    pub fn with_auth_token<S: ToString>(mut self, token: S) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn api_url(&self) -> &Url { &self.api_url }
    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn auth_token(&self) -> Option<&str> { self.auth_token.as_deref() }

    /// Initialize a session from the content of a valid backing file.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let session = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };
        Ok(session)
    }

    /// Store this session into a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), BoxError> {
        let file = std::fs::File::create(path)
            .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;
        serde_json::to_writer(file, self)?;
        Ok(())
    }
}

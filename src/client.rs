//! This module provides a client to connect to the task service

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::BoxError;
use crate::session::Session;
use crate::task::{Task, TaskDraft, TaskId};
use crate::calendar::entry::{CalendarEntry, UserId};
use crate::traits::{CalendarEntryStore, TaskSource};


/// The body of a task creation or update
#[derive(Serialize)]
struct TaskBody<'a> {
    #[serde(flatten)]
    draft: &'a TaskDraft,
    user_id: UserId,
}

/// The calendar service either replies with a single entry or with every entry of the user
#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesReply {
    Many(Vec<CalendarEntry>),
    One(CalendarEntry),
}

impl EntriesReply {
    fn into_entries(self) -> Vec<CalendarEntry> {
        match self {
            EntriesReply::Many(v) => v,
            EntriesReply::One(e) => vec![e],
        }
    }
}


/// A client for the REST API of the task service
pub struct Client {
    api_url: Url,
    auth_token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(api_url: S) -> Result<Self, BoxError> {
        let mut api_url = Url::parse(api_url.as_ref())?;
        if api_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as an API root", api_url).into());
        }
        // Make sure endpoints are joined under the API root, not next to it
        if api_url.path().ends_with('/') == false {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self {
            api_url,
            auth_token: None,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the API root and the credentials of a session
    pub fn from_session(session: &Session) -> Result<Self, BoxError> {
        let mut client = Self::new(session.api_url())?;
        client.auth_token = session.auth_token().map(String::from);
        Ok(client)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BoxError> {
        Ok(self.api_url.join(path)?)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn check_status(response: &Response, url: &Url) -> Result<(), BoxError> {
    if response.status().is_success() == false {
        return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
    }
    Ok(())
}


#[async_trait]
impl TaskSource for Client {
    async fn fetch_tasks(&self, user_id: UserId) -> Result<Vec<Task>, BoxError> {
        let url = self.endpoint(&format!("tasks/fetch/{}", user_id))?;
        let response = self.request(reqwest::Method::GET, url.clone())
            .send()
            .await?;
        check_status(&response, &url)?;

        let tasks: Vec<Task> = response.json().await?;
        log::debug!("Fetched {} tasks for user {}", tasks.len(), user_id);
        Ok(tasks)
    }

    async fn create_task(&self, user_id: UserId, draft: &TaskDraft) -> Result<Task, BoxError> {
        let url = self.endpoint("tasks/create")?;
        let response = self.request(reqwest::Method::POST, url.clone())
            .json(&TaskBody { draft, user_id })
            .send()
            .await?;
        check_status(&response, &url)?;

        let task: Task = response.json().await?;
        log::debug!("Created task {} for user {}", task.id(), user_id);
        Ok(task)
    }

    async fn update_task(&self, user_id: UserId, task_id: TaskId, draft: &TaskDraft) -> Result<Task, BoxError> {
        let url = self.endpoint(&format!("tasks/update/{}", task_id))?;
        let response = self.request(reqwest::Method::PUT, url.clone())
            .json(&TaskBody { draft, user_id })
            .send()
            .await?;
        check_status(&response, &url)?;

        Ok(response.json().await?)
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), BoxError> {
        let url = self.endpoint(&format!("tasks/delete/{}", task_id))?;
        let response = self.request(reqwest::Method::DELETE, url.clone())
            .send()
            .await?;
        check_status(&response, &url)?;

        Ok(())
    }
}

#[async_trait]
impl CalendarEntryStore for Client {
    async fn find_entry(&self, user_id: UserId, task_id: TaskId) -> Result<Option<CalendarEntry>, BoxError> {
        let url = self.endpoint(&format!("calendar/{}", user_id))?;
        let response = self.request(reqwest::Method::GET, url.clone())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(&response, &url)?;

        let reply: EntriesReply = response.json().await?;
        Ok(reply.into_entries()
            .into_iter()
            .find(|entry| entry.is_for(user_id, task_id)))
    }

    async fn create_entry(&self, entry: &CalendarEntry) -> Result<(), BoxError> {
        let url = self.endpoint("calendar")?;
        let response = self.request(reqwest::Method::POST, url.clone())
            .json(entry)
            .send()
            .await?;
        check_status(&response, &url)?;

        Ok(())
    }
}

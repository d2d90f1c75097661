//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Root of the REST API of the task service, used by sessions that do not specify one.
/// Feel free to override it when initing this library.
pub static DEFAULT_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:8000/api".to_string())));

/// Returns the current value of [`DEFAULT_API_URL`]
pub fn default_api_url() -> String {
    match DEFAULT_API_URL.lock() {
        Ok(url) => url.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

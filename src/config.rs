//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Base URL of the planning service (the one that serves the roster, the holiday feed and the optimizer).
/// Feel free to override it when initing this library.
pub static SERVICE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:8000/".to_string())));

/// Folder where the [`Cache`](crate::cache::Cache) stores its snapshots.
/// Feel free to override it when initing this library.
pub static CACHE_FOLDER: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("sprint_grid_cache".to_string())));

/// Environment variable that overrides [`SERVICE_URL`]
pub const SERVICE_URL_ENV: &str = "SPRINT_GRID_URL";

/// Returns the current value of [`SERVICE_URL`]
pub fn service_url() -> String {
    match SERVICE_URL.lock() {
        Ok(url) => url.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Returns the current value of [`CACHE_FOLDER`]
pub fn cache_folder() -> String {
    match CACHE_FOLDER.lock() {
        Ok(folder) => folder.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Overrides [`SERVICE_URL`]
pub fn set_service_url<S: ToString>(url: S) {
    let url = url.to_string();
    match SERVICE_URL.lock() {
        Ok(mut current) => *current = url,
        Err(poisoned) => *poisoned.into_inner() = url,
    }
}

/// Overrides [`CACHE_FOLDER`]
pub fn set_cache_folder<S: ToString>(folder: S) {
    let folder = folder.to_string();
    match CACHE_FOLDER.lock() {
        Ok(mut current) => *current = folder,
        Err(poisoned) => *poisoned.into_inner() = folder,
    }
}

/// Reads [`SERVICE_URL_ENV`] and overrides [`SERVICE_URL`] when it is set
pub fn load_from_env() {
    if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
        log::debug!("Using service URL {} from {}", url, SERVICE_URL_ENV);
        set_service_url(url);
    }
}

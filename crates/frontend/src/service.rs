use std::future::Future;

use api_types::{category::Category, entry::Entry};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// A persisted domain entity handled through the resource forms.
pub trait Resource:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Server-assigned identifier, `None` until the resource is created.
    fn id(&self) -> Option<i64>;
}

impl Resource for Category {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Resource for Entry {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-2xx response. The raw body is kept so callers can parse
    /// structured validation errors out of it.
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("resource has no id")]
    MissingId,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Remote CRUD operations for one resource type.
///
/// Every call yields a single eventual result.
pub trait ResourceService<T: Resource>: Send + Sync {
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, ServiceError>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<T, ServiceError>> + Send;

    fn create(&self, resource: T) -> impl Future<Output = Result<T, ServiceError>> + Send;

    fn update(&self, resource: T) -> impl Future<Output = Result<T, ServiceError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

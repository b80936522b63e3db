//! JSON REST implementation of [`ResourceService`].

use std::{marker::PhantomData, time::Duration};

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::service::{Resource, ResourceService, ServiceError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("http client error: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        // Without the trailing slash `Url::join` would replace the last
        // segment (`/api` + `entries` = `/entries`).
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Handle for the collection mounted at `path` (e.g. `entries`).
    pub fn resource<T: Resource>(&self, path: &'static str) -> RestResource<T> {
        RestResource {
            client: self.clone(),
            path,
            _resource: PhantomData,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ServiceError::InvalidUrl(format!("{path}: {err}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ServiceError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "api request");
        Ok(self.http.request(method, url))
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<Vec<u8>, ServiceError> {
        let res = request.send().await.map_err(|err| {
            tracing::warn!("api request failed: {err}");
            ServiceError::Transport(err)
        })?;

        let status = res.status();
        let body = res.bytes().await?;
        if status.is_success() {
            return Ok(body.to_vec());
        }

        let body = String::from_utf8_lossy(&body).into_owned();
        tracing::warn!(status = status.as_u16(), %body, "api request rejected");
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<R, ServiceError> {
        let body = self.send_raw(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// REST collection of `T`, mounted at `{base_url}/{path}`.
#[derive(Debug)]
pub struct RestResource<T> {
    client: RestClient,
    path: &'static str,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            _resource: PhantomData,
        }
    }
}

impl<T> RestResource<T> {
    pub fn path(&self) -> &'static str {
        self.path
    }

    fn member(&self, id: i64) -> String {
        format!("{}/{id}", self.path)
    }
}

impl<T: Resource> ResourceService<T> for RestResource<T> {
    async fn get_all(&self) -> Result<Vec<T>, ServiceError> {
        let request = self.client.request(Method::GET, self.path)?;
        self.client.send_json(request).await
    }

    async fn get_by_id(&self, id: i64) -> Result<T, ServiceError> {
        let request = self.client.request(Method::GET, &self.member(id))?;
        self.client.send_json(request).await
    }

    async fn create(&self, resource: T) -> Result<T, ServiceError> {
        let request = self.client.request(Method::POST, self.path)?.json(&resource);
        self.client.send_json(request).await
    }

    async fn update(&self, resource: T) -> Result<T, ServiceError> {
        let id = resource.id().ok_or(ServiceError::MissingId)?;
        let request = self
            .client
            .request(Method::PUT, &self.member(id))?
            .json(&resource);
        self.client.send_json(request).await
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let request = self.client.request(Method::DELETE, &self.member(id))?;
        self.client.send_raw(request).await.map(|_| ())
    }
}

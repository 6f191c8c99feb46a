//! HTTP gateway for the users collection.
//!
//! ```text
//! GET    <base>        -> 200 [{id,name,email}] | null
//! POST   <base>        -> 200/201 {id,name,email}
//! PUT    <base>/<id>   -> 200 {id,name,email}
//! DELETE <base>/<id>   -> 204
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{User, UserId},
    error::describe_failure,
    protocol::{UserListResponse, UserPayload},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_USERS_PATH: &str = "/api/v1/users/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn failed(self, status: Option<u16>, message: impl Into<String>) -> GatewayError {
        let message = message.into();
        match self {
            Self::Fetch => GatewayError::FetchFailed { status, message },
            Self::Create => GatewayError::CreateFailed { status, message },
            Self::Update => GatewayError::UpdateFailed { status, message },
            Self::Delete => GatewayError::DeleteFailed { status, message },
        }
    }
}

fn with_status(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {code}: {message}"),
        None => message.to_string(),
    }
}

/// Failure of a single gateway call. `status` is `None` when no response
/// was received at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("could not load users: {}", with_status(.status, .message))]
    FetchFailed { status: Option<u16>, message: String },
    #[error("could not create user: {}", with_status(.status, .message))]
    CreateFailed { status: Option<u16>, message: String },
    #[error("could not update user: {}", with_status(.status, .message))]
    UpdateFailed { status: Option<u16>, message: String },
    #[error("could not delete user: {}", with_status(.status, .message))]
    DeleteFailed { status: Option<u16>, message: String },
}

impl GatewayError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::FetchFailed { .. } => Operation::Fetch,
            Self::CreateFailed { .. } => Operation::Create,
            Self::UpdateFailed { .. } => Operation::Update,
            Self::DeleteFailed { .. } => Operation::Delete,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. }
            | Self::CreateFailed { status, .. }
            | Self::UpdateFailed { status, .. }
            | Self::DeleteFailed { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::FetchFailed { message, .. }
            | Self::CreateFailed { message, .. }
            | Self::UpdateFailed { message, .. }
            | Self::DeleteFailed { message, .. } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status().is_none()
    }
}

#[derive(Debug, Error)]
pub enum GatewayConfigError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url must start with http:// or https://, got '{0}'")]
    UnsupportedScheme(String),
}

#[async_trait]
pub trait UsersGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, GatewayError>;
    async fn create(&self, name: &str, email: &str) -> Result<User, GatewayError>;
    async fn update(&self, id: UserId, name: &str, email: &str) -> Result<User, GatewayError>;
    async fn delete(&self, id: UserId) -> Result<(), GatewayError>;
}

/// Builds the collection URL from a server origin and a collection path,
/// keeping any path prefix already present on the server URL. A trailing
/// slash on `users_path` is kept; some servers route the collection only
/// with it.
pub fn collection_url(server_url: &str, users_path: &str) -> Result<String, GatewayConfigError> {
    let raw = server_url.trim();
    let mut url = Url::parse(raw).map_err(|source| GatewayConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayConfigError::UnsupportedScheme(raw.to_string()));
    }

    let prefix = url.path().trim_end_matches('/').to_string();
    let path = users_path.trim().trim_matches('/');
    let trailing_slash = !path.is_empty() && users_path.trim().ends_with('/');
    url.set_path(&format!("{prefix}/{path}"));
    url.set_query(None);
    url.set_fragment(None);

    let base = url.as_str().trim_end_matches('/');
    if trailing_slash {
        Ok(format!("{base}/"))
    } else {
        Ok(base.to_string())
    }
}

pub struct HttpUsersGateway {
    http: Client,
    collection: String,
}

impl HttpUsersGateway {
    pub fn new(server_url: &str, users_path: &str) -> Result<Self, GatewayConfigError> {
        Self::with_client(Client::new(), server_url, users_path)
    }

    pub fn with_client(
        http: Client,
        server_url: &str,
        users_path: &str,
    ) -> Result<Self, GatewayConfigError> {
        Ok(Self {
            http,
            collection: collection_url(server_url, users_path)?,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn member(&self, id: UserId) -> String {
        format!("{}/{id}", self.collection.trim_end_matches('/'))
    }
}

async fn ensure_success(operation: Operation, response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = describe_failure(status.as_u16(), status.canonical_reason(), &body);
    warn!(
        operation = operation.as_str(),
        status = status.as_u16(),
        %message,
        "users request rejected"
    );
    Err(operation.failed(Some(status.as_u16()), message))
}

fn transport_failure(operation: Operation, err: reqwest::Error) -> GatewayError {
    warn!(operation = operation.as_str(), error = %err, "users request did not complete");
    operation.failed(None, err.to_string())
}

async fn read_user(operation: Operation, response: Response) -> Result<User, GatewayError> {
    let status = response.status().as_u16();
    response
        .json::<User>()
        .await
        .map_err(|err| operation.failed(Some(status), format!("invalid user in response: {err}")))
}

#[async_trait]
impl UsersGateway for HttpUsersGateway {
    async fn list(&self) -> Result<Vec<User>, GatewayError> {
        let operation = Operation::Fetch;
        debug!(url = %self.collection, "GET users");
        let response = self
            .http
            .get(&self.collection)
            .send()
            .await
            .map_err(|err| transport_failure(operation, err))?;
        let response = ensure_success(operation, response).await?;
        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|err| transport_failure(operation, err))?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<UserListResponse>(&body)
            .map(UserListResponse::into_users)
            .map_err(|err| operation.failed(Some(status), format!("invalid user list: {err}")))
    }

    async fn create(&self, name: &str, email: &str) -> Result<User, GatewayError> {
        let operation = Operation::Create;
        debug!(url = %self.collection, "POST user");
        let response = self
            .http
            .post(&self.collection)
            .json(&UserPayload::new(name, email))
            .send()
            .await
            .map_err(|err| transport_failure(operation, err))?;
        let response = ensure_success(operation, response).await?;
        read_user(operation, response).await
    }

    async fn update(&self, id: UserId, name: &str, email: &str) -> Result<User, GatewayError> {
        let operation = Operation::Update;
        let url = self.member(id);
        debug!(%url, "PUT user");
        let response = self
            .http
            .put(&url)
            .json(&UserPayload::new(name, email))
            .send()
            .await
            .map_err(|err| transport_failure(operation, err))?;
        let response = ensure_success(operation, response).await?;
        read_user(operation, response).await
    }

    async fn delete(&self, id: UserId) -> Result<(), GatewayError> {
        let operation = Operation::Delete;
        let url = self.member(id);
        debug!(%url, "DELETE user");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|err| transport_failure(operation, err))?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        ensure_success(operation, response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;

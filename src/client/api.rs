use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::error::{ClientError, ClientResult};
use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::users::{PaginatedUsersResponse, StatusResponse, UserRequest, UsersPageQuery};

/// Remote operations on the users resource.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetches one page of the (optionally filtered) user list.
    async fn list_page(&self, query: &UsersPageQuery) -> ClientResult<PaginatedUsersResponse>;

    async fn get_user(&self, id: &UserId) -> ClientResult<User>;

    async fn create_user(&self, request: &UserRequest) -> ClientResult<User>;

    async fn update_user(&self, id: &UserId, request: &UserRequest) -> ClientResult<User>;

    async fn delete_user(&self, id: &UserId) -> ClientResult<()>;
}

/// [`UsersApi`] over HTTP against a running users server.
#[derive(Clone)]
pub struct HttpUsersApi {
    http: Client,
    base_url: String,
}

impl HttpUsersApi {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:4000`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("chitfund-users/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn user_url(&self, id: &UserId) -> String {
        format!("{}/api/users/{id}", self.base_url)
    }
}

/// Turns a non-success response into [`ClientError`], preferring the
/// server's `message` when the body is a [`StatusResponse`].
async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StatusResponse>(&body)
        .map(|parsed| parsed.message)
        .unwrap_or(body);

    ClientError::Server {
        status: status.as_u16(),
        message,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_page(&self, query: &UsersPageQuery) -> ClientResult<PaginatedUsersResponse> {
        let url = format!("{}/paginated", self.users_url());
        log::debug!("Fetching users page {url} {query:?}");

        let response = self.http.get(&url).query(query).send().await?;
        read_json(response).await
    }

    async fn get_user(&self, id: &UserId) -> ClientResult<User> {
        let response = self.http.get(self.user_url(id)).send().await?;
        read_json(response).await
    }

    async fn create_user(&self, request: &UserRequest) -> ClientResult<User> {
        let response = self.http.post(self.users_url()).json(request).send().await?;
        let user: User = read_json(response).await?;
        log::info!("Created user {}", user.id);
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, request: &UserRequest) -> ClientResult<User> {
        let response = self.http.put(self.user_url(id)).json(request).send().await?;
        read_json(response).await
    }

    async fn delete_user(&self, id: &UserId) -> ClientResult<()> {
        let response = self.http.delete(self.user_url(id)).send().await?;
        let _: StatusResponse = read_json(response).await?;
        log::info!("Deleted user {id}");
        Ok(())
    }
}

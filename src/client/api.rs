/**
 * HTTP API Client
 *
 * Thin typed wrapper over the backend's JSON endpoints. Authenticated calls
 * send the session token in the `token` header.
 *
 * Error responses carry `{"success": false, "message": ...}`; that message
 * ends up in `ClientError::Rejected`.
 */

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::shared::{
    AuthResponse, CheckAuthResponse, LoginRequest, MarkSeenResponse, MessagesResponse,
    SendMessageRequest, SendMessageResponse, SidebarResponse, SignupRequest,
    UpdateProfileRequest, UpdateProfileResponse, UsersResponse,
};

/// Header carrying the session token
pub const TOKEN_HEADER: &str = "token";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<String, ClientError> {
        let response = self.http.get(self.config.api_url("/api/status")).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    /// `POST /api/auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.http.post(self.config.api_url("/api/auth/signup")).json(request);
        send_json(builder).await
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.http.post(self.config.api_url("/api/auth/login")).json(request);
        send_json(builder).await
    }

    /// `GET /api/auth/check`
    pub async fn check(&self, token: &str) -> Result<CheckAuthResponse, ClientError> {
        send_json(self.authed_get("/api/auth/check", token)).await
    }

    /// `PUT /api/auth/update-profile`
    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ClientError> {
        let builder = self
            .http
            .put(self.config.api_url("/api/auth/update-profile"))
            .header(TOKEN_HEADER, token)
            .json(request);
        send_json(builder).await
    }

    /// `GET /api/user`
    pub async fn users(&self, token: &str) -> Result<UsersResponse, ClientError> {
        send_json(self.authed_get("/api/user", token)).await
    }

    /// `GET /api/messages/users`
    pub async fn sidebar(&self, token: &str) -> Result<SidebarResponse, ClientError> {
        send_json(self.authed_get("/api/messages/users", token)).await
    }

    /// `GET /api/messages/{id}`
    pub async fn messages(&self, token: &str, other: Uuid) -> Result<MessagesResponse, ClientError> {
        send_json(self.authed_get(&format!("/api/messages/{}", other), token)).await
    }

    /// `PUT /api/messages/mark/{id}`
    pub async fn mark_seen(&self, token: &str, message_id: Uuid) -> Result<MarkSeenResponse, ClientError> {
        let builder = self
            .http
            .put(self.config.api_url(&format!("/api/messages/mark/{}", message_id)))
            .header(TOKEN_HEADER, token);
        send_json(builder).await
    }

    /// `POST /api/messages/send/{id}`
    pub async fn send_message(
        &self,
        token: &str,
        receiver: Uuid,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ClientError> {
        let builder = self
            .http
            .post(self.config.api_url(&format!("/api/messages/send/{}", receiver)))
            .header(TOKEN_HEADER, token)
            .json(request);
        send_json(builder).await
    }

    fn authed_get(&self, path: &str, token: &str) -> RequestBuilder {
        self.http
            .get(self.config.api_url(path))
            .header(TOKEN_HEADER, token)
    }
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
    let response = check_status(builder.send().await?).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Turn an error status into `ClientError::Rejected`
pub(crate) async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    tracing::debug!("[Auth] Request rejected ({}): {}", status, message);

    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

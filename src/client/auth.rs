/**
 * Session Context
 *
 * `AuthContext` holds the client's view of the session: the current user,
 * the session token, the online set and the realtime connection. It keeps
 * the token store, the local state and the realtime connection consistent
 * with each other.
 *
 * # Lifecycle
 *
 * 1. **load**: a stored, unexpired token is checked against the server; on
 *    success the user is set and the realtime stream is opened
 * 2. **login / signup**: the new token is stored, the user set, and the
 *    realtime stream opened if it is not open already
 * 3. **logout**: the token is cleared and the stream closed
 */

use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use crate::client::api::ApiClient;
use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::realtime::RealtimeConnection;
use crate::client::session::{is_expired, TokenStore};
use crate::shared::{
    AuthResponse, ChatMessage, LoginRequest, SendMessageRequest, SidebarResponse, SignupRequest,
    UpdateProfileRequest, UserData,
};

/// Capacity of the new-message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

pub struct AuthContext<S: TokenStore> {
    api: ApiClient,
    store: S,
    token: Option<String>,
    user: Option<UserData>,
    online: watch::Sender<Vec<String>>,
    messages: broadcast::Sender<ChatMessage>,
    realtime: Option<RealtimeConnection>,
}

impl<S: TokenStore> AuthContext<S> {
    /// Context for a backend URL
    pub fn new(server_url: impl Into<String>, store: S) -> Result<Self, ClientError> {
        Ok(Self::with_config(ClientConfig::new(server_url)?, store))
    }

    pub fn with_config(config: ClientConfig, store: S) -> Self {
        let (online, _) = watch::channel(Vec::new());
        let (messages, _) = broadcast::channel(MESSAGE_CHANNEL_CAPACITY);

        Self {
            api: ApiClient::new(config),
            store,
            token: None,
            user: None,
            online,
            messages,
            realtime: None,
        }
    }

    /// Restore the session from the token store
    ///
    /// - No stored token: nothing happens
    /// - Expired token: cleared from the store, the server is not asked
    /// - Otherwise `check` is called; on success the user is set and the
    ///   realtime stream opened
    ///
    /// # Errors
    ///
    /// The `check` failure. The local session (user, token in use, realtime
    /// stream) is ended but the stored token is kept.
    pub async fn load(&mut self) -> Result<Option<UserData>, ClientError> {
        let token = match self.store.load()? {
            Some(token) => token,
            None => return Ok(None),
        };

        if is_expired(&token) {
            tracing::info!("[Auth] Stored token expired, discarding");
            self.store.clear()?;
            self.end_local_session();
            return Ok(None);
        }

        match self.api.check(&token).await {
            Ok(response) => {
                let user = response.user_data;
                tracing::info!("[Auth] Session restored for {}", user.email);
                self.token = Some(token);
                self.user = Some(user.clone());
                self.connect_realtime().await;
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!("[Auth] Stored token rejected: {}", e);
                self.end_local_session();
                Err(e)
            }
        }
    }

    /// Log in and open the realtime stream
    pub async fn login(&mut self, mut request: LoginRequest) -> Result<UserData, ClientError> {
        request.normalize().map_err(|e| ClientError::Rejected {
            status: 400,
            message: e.message().to_string(),
        })?;
        let response = self.api.login(&request).await?;
        self.start_session(response).await
    }

    /// Create an account and open the realtime stream
    pub async fn signup(&mut self, mut request: SignupRequest) -> Result<UserData, ClientError> {
        request.normalize().map_err(|e| ClientError::Rejected {
            status: 400,
            message: e.message().to_string(),
        })?;
        let response = self.api.signup(&request).await?;
        self.start_session(response).await
    }

    /// Clear the session and close the realtime stream
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.end_local_session();
        self.store.clear()?;

        tracing::info!("[Auth] Logged out");
        Ok(())
    }

    /// Update the current user's profile
    pub async fn update_profile(&mut self, request: UpdateProfileRequest) -> Result<UserData, ClientError> {
        let token = self.require_token()?;
        let response = self.api.update_profile(&token, &request).await?;
        self.user = Some(response.user.clone());
        Ok(response.user)
    }

    /// Sidebar data: other users and unseen counts
    pub async fn sidebar(&self) -> Result<SidebarResponse, ClientError> {
        let token = self.require_token()?;
        self.api.sidebar(&token).await
    }

    /// Conversation with another user
    pub async fn conversation(&self, other: Uuid) -> Result<Vec<ChatMessage>, ClientError> {
        let token = self.require_token()?;
        Ok(self.api.messages(&token, other).await?.messages)
    }

    /// Send a direct message
    pub async fn send_message(
        &self,
        receiver: Uuid,
        request: SendMessageRequest,
    ) -> Result<ChatMessage, ClientError> {
        let token = self.require_token()?;
        Ok(self.api.send_message(&token, receiver, &request).await?.new_message)
    }

    pub fn user(&self) -> Option<&UserData> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current online set
    pub fn online_users(&self) -> Vec<String> {
        self.online.borrow().clone()
    }

    /// Watch the online set
    pub fn subscribe_online(&self) -> watch::Receiver<Vec<String>> {
        self.online.subscribe()
    }

    /// Receive messages pushed over the realtime stream
    pub fn subscribe_messages(&self) -> broadcast::Receiver<ChatMessage> {
        self.messages.subscribe()
    }

    /// Whether the realtime stream is open
    pub fn is_realtime_connected(&self) -> bool {
        self.realtime.as_ref().is_some_and(RealtimeConnection::is_open)
    }

    async fn start_session(&mut self, response: AuthResponse) -> Result<UserData, ClientError> {
        self.store.save(&response.token)?;
        self.token = Some(response.token);
        self.user = Some(response.user_data.clone());

        tracing::info!("[Auth] Signed in as {}", response.user_data.email);

        self.connect_realtime().await;
        Ok(response.user_data)
    }

    /// Open the realtime stream for the current user unless one is open
    ///
    /// A failure to connect is logged; the session stays usable over HTTP.
    async fn connect_realtime(&mut self) {
        let user_id = match &self.user {
            Some(user) => user.id.to_string(),
            None => return,
        };

        if let Some(existing) = &self.realtime {
            if existing.is_open() && existing.user_id() == user_id {
                return;
            }
        }

        match RealtimeConnection::connect(&self.api, &user_id, self.online.clone(), self.messages.clone()).await {
            Ok(connection) => self.realtime = Some(connection),
            Err(e) => {
                tracing::warn!("[Realtime] Could not connect: {}", e);
                self.realtime = None;
            }
        }
    }

    /// Token of the current session; set only by a successful load, login
    /// or signup
    fn require_token(&self) -> Result<String, ClientError> {
        self.token.clone().ok_or(ClientError::NotAuthenticated)
    }

    fn end_local_session(&mut self) {
        if let Some(connection) = self.realtime.take() {
            connection.close();
        }
        self.token = None;
        self.user = None;
        self.online.send_replace(Vec::new());
    }
}

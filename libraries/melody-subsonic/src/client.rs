//! Main Subsonic client.

use crate::auth::generate_credentials;
use crate::error::{Result, SubsonicError};
use crate::types::{Credentials, Empty, Envelope, SubsonicConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Client for a Subsonic-compatible music server.
///
/// Holds the HTTP client and the current session. Construct one per server
/// and pass it to whatever needs catalog access; it is not a global.
///
/// # Example
///
/// ```ignore
/// use melody_subsonic::{SubsonicClient, SubsonicConfig};
///
/// let client = SubsonicClient::new(SubsonicConfig::new("https://music.example.com"))?;
/// client.login("alice", "sesame").await?;
///
/// let page = client.songs_page(1, 10).await?;
/// println!("First page has {} songs", page.songs.len());
/// ```
pub struct SubsonicClient {
    http: Client,
    config: SubsonicConfig,
    session: Arc<RwLock<Option<Credentials>>>,
}

impl SubsonicClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SubsonicConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(SubsonicError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SubsonicError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| SubsonicError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "{}/{}",
                config.client_name,
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(SubsonicError::Request)?;

        Ok(Self {
            http,
            config: SubsonicConfig { url, ..config },
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Check if a session is established.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Current session credentials, for the caller to persist.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.session.read().await.clone()
    }

    /// Login with username and password.
    ///
    /// Derives token credentials and verifies them with `ping`. On any
    /// failure the session is cleared.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let credentials = generate_credentials(username, password, &self.config.url);
        *self.session.write().await = Some(credentials);

        debug!(username = %username, url = %self.config.url, "Attempting login");

        match self.get::<Empty>("ping.view", &[]).await {
            Ok(_) => {
                info!(username = %username, "Login successful");
                Ok(())
            }
            Err(e) => {
                *self.session.write().await = None;
                warn!(username = %username, error = %e, "Login failed");
                Err(e)
            }
        }
    }

    /// Reuse previously saved credentials without contacting the server.
    pub async fn restore(&self, credentials: Credentials) {
        debug!(username = %credentials.username, "Restoring session");
        *self.session.write().await = Some(credentials);
    }

    /// Clear the session (logout).
    pub async fn logout(&self) {
        *self.session.write().await = None;
        info!("Logged out");
    }

    /// Check that the server answers with the current session.
    pub async fn ping(&self) -> Result<()> {
        self.get::<Empty>("ping.view", &[]).await.map(|_| ())
    }

    /// Build an authenticated REST URL.
    pub(crate) async fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let session = self.session.read().await;
        let credentials = session.as_ref().ok_or(SubsonicError::AuthRequired)?;

        let mut url = Url::parse(&format!("{}/rest/{}", credentials.server_url, endpoint))
            .map_err(|e| SubsonicError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("u", &credentials.username)
            .append_pair("t", &credentials.token)
            .append_pair("s", &credentials.salt)
            .append_pair("v", &self.config.api_version)
            .append_pair("c", &self.config.client_name)
            .append_pair("f", "json");

        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }

    /// GET an endpoint and unwrap the Subsonic envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(endpoint, params).await?;
        debug!(endpoint = %endpoint, "Subsonic request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(SubsonicError::transport)?;

        let status = response.status();

        if status.as_u16() == 401 {
            return Err(SubsonicError::AuthFailed("Server rejected credentials".into()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubsonicError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            SubsonicError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })?;

        let body = envelope.response;
        if body.status == "ok" {
            Ok(body.payload)
        } else {
            let (code, message) = body
                .error
                .map(|e| (e.code, e.message))
                .unwrap_or((0, format!("status {}", body.status)));
            warn!(endpoint = %endpoint, code, message = %message, "Subsonic request failed");
            Err(SubsonicError::from_api(code, message))
        }
    }
}

impl std::fmt::Debug for SubsonicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsonicClient")
            .field("url", &self.config.url)
            .field("client_name", &self.config.client_name)
            .finish_non_exhaustive()
    }
}

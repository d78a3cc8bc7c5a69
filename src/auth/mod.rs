//! Authentication and session management for the admin API

mod session;
mod types;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::Error;
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// Client for authentication against the admin API.
///
/// Sole writer of the session state; resource clients read it through a
/// [`SessionHandle`]. The token is mirrored to a [`TokenStore`] so a session
/// survives restarts.
pub struct Auth {
    /// The base URL for the admin API
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    state: Arc<Mutex<SessionState>>,

    /// Durable token storage
    store: Arc<dyn TokenStore>,
}

impl Auth {
    /// Create a new Auth client, restoring any persisted token.
    ///
    /// A restored token starts with no profile attached; call [`Auth::me`]
    /// to validate it and populate the profile.
    pub(crate) fn new(url: &str, client: Client, store: Arc<dyn TokenStore>) -> Self {
        let state = SessionState {
            token: store.load(),
            profile: None,
        };

        Self {
            url: url.to_string(),
            client,
            state: Arc::new(Mutex::new(state)),
            store,
        }
    }

    /// A read-only view of the session for resource clients.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(Arc::clone(&self.state))
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    /// The current user's profile, if it has been fetched.
    pub fn profile(&self) -> Option<Profile> {
        self.state.lock().unwrap().profile.clone()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }

    /// Log in with email and password.
    ///
    /// On success the token is stored (memory and durable store) and the
    /// profile is fetched for it. On failure the error carries the server's
    /// message where one was provided.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, Error> {
        let url = format!("{}/login", self.url);

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let result = Fetch::post(&self.client, &url)
            .json(&body)?
            .execute::<LoginResponse>()
            .await?;

        let token = match result.token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(Error::auth("Login failed")),
        };

        self.store.save(&token);
        {
            let mut state = self.state.lock().unwrap();
            state.token = Some(token);
            state.profile = result.user.clone();
        }
        debug!(%email, "login succeeded");

        // The login body may or may not embed the user; /me is authoritative.
        match result.user {
            Some(profile) => Ok(profile),
            None => self.me().await,
        }
    }

    /// Fetch the profile for the current token.
    ///
    /// A 401 here means the stored token is dead; the session is cleared
    /// rather than left half-authenticated.
    pub async fn me(&self) -> Result<Profile, Error> {
        let url = format!("{}/me", self.url);

        let token = self.token().ok_or_else(|| Error::auth("Not logged in"))?;

        let result = Fetch::get(&self.client, &url)
            .bearer_auth(Some(&token))
            .execute::<Profile>()
            .await;

        match result {
            Ok(profile) => {
                self.state.lock().unwrap().profile = Some(profile.clone());
                Ok(profile)
            }
            Err(err) if err.is_auth() => {
                warn!("stored token rejected, clearing session");
                self.logout();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Clear the session, synchronously and unconditionally.
    pub fn logout(&self) {
        self.store.clear();
        let mut state = self.state.lock().unwrap();
        state.token = None;
        state.profile = None;
    }
}

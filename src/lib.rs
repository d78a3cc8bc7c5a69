//! Servio Admin Client Library
//!
//! A Rust client for the Servio marketplace admin API, providing typed
//! resource access (users, categories, cities, lookups), session-backed
//! authentication, and headless controllers for the paginated list views
//! and the account editor that every admin screen is built from.

pub mod auth;
pub mod config;
pub mod editor;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod resources;
pub mod routes;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::{Auth, MemoryTokenStore, SessionHandle, TokenStore};
use crate::config::ClientOptions;
use crate::editor::{AccountEditor, EditorMode};
use crate::error::Error;
use crate::listing::ListController;
use crate::resources::types::{Category, City, UserRow};
use crate::resources::{CategoriesClient, CitiesClient, LookupsClient, UsersClient};

/// The main entry point for the Servio admin client
pub struct AdminClient {
    /// The base URL for the admin API
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for login, logout, and the current session
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl AdminClient {
    /// Create a client for a base URL with an in-memory token store.
    ///
    /// # Example
    ///
    /// ```
    /// use servio_admin::AdminClient;
    ///
    /// let client = AdminClient::new("http://localhost/api/cms/v1");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(
            ClientOptions::default().with_base_url(base_url),
            Arc::new(MemoryTokenStore::new()),
        )
    }

    /// Create a client with custom options and token storage.
    pub fn new_with_options(options: ClientOptions, store: Arc<dyn TokenStore>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        let auth = Auth::new(&options.base_url, http_client.clone(), store);

        Self {
            url: options.base_url.clone(),
            http_client,
            auth,
            options,
        }
    }

    /// Create a client configured from the environment (`ADMIN_API_BASE`).
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new_with_options(
            ClientOptions::from_env()?,
            Arc::new(MemoryTokenStore::new()),
        ))
    }

    /// The auth client for login, logout, and session access
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    fn session(&self) -> SessionHandle {
        self.auth.handle()
    }

    /// Client for the users resource
    pub fn users(&self) -> UsersClient {
        UsersClient::new(&self.url, self.http_client.clone(), self.session())
    }

    /// Client for the categories resource
    pub fn categories(&self) -> CategoriesClient {
        CategoriesClient::new(&self.url, self.http_client.clone(), self.session())
    }

    /// Client for the cities (workspaces) resource
    pub fn cities(&self) -> CitiesClient {
        CitiesClient::new(&self.url, self.http_client.clone(), self.session())
    }

    /// Client for the unpaginated option lists
    pub fn lookups(&self) -> LookupsClient {
        LookupsClient::new(&self.url, self.http_client.clone(), self.session())
    }

    /// A list controller configured with this client's defaults.
    pub fn list_controller<T>(&self) -> ListController<T> {
        ListController::new(self.options.default_page_size, self.options.debounce)
    }

    /// Pump one fetch cycle for a users list controller: if any dependency
    /// changed, perform the fetch and fold the outcome back in.
    pub async fn refresh_users(&self, controller: &mut ListController<UserRow>) {
        if let Some(request) = controller.take_request() {
            let result = self.users().list(&request.query).await;
            controller.apply(request.seq, result);
        }
    }

    /// Pump one fetch cycle for a categories list controller.
    pub async fn refresh_categories(&self, controller: &mut ListController<Category>) {
        if let Some(request) = controller.take_request() {
            let result = self.categories().list(&request.query).await;
            controller.apply(request.seq, result);
        }
    }

    /// Pump one fetch cycle for a cities list controller.
    pub async fn refresh_cities(&self, controller: &mut ListController<City>) {
        if let Some(request) = controller.take_request() {
            let result = self.cities().list(&request.query).await;
            controller.apply(request.seq, result);
        }
    }

    /// Drive one submit cycle for an account editor: validate, send, and fold
    /// the outcome back in. A validation failure is returned as
    /// `Error::Validation` for the first offending field, without any request
    /// being sent.
    pub async fn save_account(&self, editor: &mut AccountEditor) -> Result<(), Error> {
        let payload = match editor.try_submit() {
            Some(payload) => payload,
            None => {
                let (field, message) = match editor.errors().first() {
                    Some(err) => (err.field.clone(), err.message.clone()),
                    None => ("form".to_string(), "invalid input".to_string()),
                };
                return Err(Error::validation(field, message));
            }
        };

        let result = match editor.mode() {
            EditorMode::Create => self.users().create(&payload).await,
            EditorMode::Edit(id) => self.users().update(id, &payload).await,
        };

        match result {
            Ok(saved) => {
                editor.submit_succeeded(saved);
                Ok(())
            }
            Err(err) => {
                editor.submit_failed(&err);
                Err(err)
            }
        }
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Profile, Role};
    pub use crate::config::ClientOptions;
    pub use crate::editor::{AccountEditor, EditorMode, EditorStatus};
    pub use crate::error::Error;
    pub use crate::listing::{ListController, PageSize, SortDirection};
    pub use crate::routes::{guard, Route};
    pub use crate::AdminClient;
}

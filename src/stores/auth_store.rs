use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClientError;
use crate::models::{Credentials, UserProfile};
use crate::services::ApiClient;
use crate::utils::storage::{KeyValueStorage, STORAGE_KEY_TOKEN, STORAGE_KEY_USER};

/// Authentication state
///
/// `token` and `user` are always set and cleared together.
/// An empty token means logged out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

pub struct SessionStore {
    api: ApiClient,
    storage: Rc<dyn KeyValueStorage>,
    state: RefCell<Session>,
}

impl SessionStore {
    /// Initialize authentication from stored credentials
    pub fn restore(api: ApiClient, storage: Rc<dyn KeyValueStorage>) -> Self {
        log::info!("Initializing authentication...");
        let session = load_session(storage.as_ref());
        if session.is_authenticated() {
            log::info!("Found stored session");
        }
        api.set_bearer(&session.token);

        Self {
            api,
            storage,
            state: RefCell::new(session),
        }
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// True iff a token is held. Not checked against the backend.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Exchange credentials for a session.
    ///
    /// On failure the previous session, if any, is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        log::info!("Logging in as {}...", username);

        let response = self
            .api
            .login(&Credentials::new(username, password))
            .await
            .map_err(|e| {
                log::error!("Login failed: {}", e);
                e
            })?;

        if response.token.is_empty() {
            log::error!("Login failed: backend returned an empty token");
            return Err(ClientError::Decode("login response without token".to_string()));
        }

        // Memory is authoritative for requests; localStorage only survives reloads
        self.api.set_bearer(&response.token);
        if let Err(e) = self.storage.set(STORAGE_KEY_TOKEN, &response.token) {
            log::warn!("{}", e);
        }
        match serde_json::to_string(&response.user) {
            Ok(user_json) => {
                if let Err(e) = self.storage.set(STORAGE_KEY_USER, &user_json) {
                    log::warn!("{}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize user profile: {}", e),
        }

        *self.state.borrow_mut() = Session {
            token: response.token,
            user: Some(response.user),
        };

        log::info!("Successfully logged in as {}", username);
        Ok(())
    }

    /// Create an account. Does not log the user in.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        log::info!("Registering {}...", username);

        self.api
            .register(&Credentials::new(username, password))
            .await
            .map_err(|e| {
                log::error!("Registration failed: {}", e);
                e
            })
    }

    /// Logout and clear credentials. No network call.
    pub fn logout(&self) {
        log::info!("Logging out...");
        *self.state.borrow_mut() = Session::default();
        self.api.set_bearer("");
        self.storage.remove(STORAGE_KEY_TOKEN);
        self.storage.remove(STORAGE_KEY_USER);
    }
}

/// Rehydrate the session from storage.
///
/// A token without a readable profile (or the reverse) is a broken session:
/// both keys are dropped so memory and storage agree on "logged out".
fn load_session(storage: &dyn KeyValueStorage) -> Session {
    let token = storage.get(STORAGE_KEY_TOKEN).unwrap_or_default();
    let user = storage.get(STORAGE_KEY_USER).and_then(|raw| {
        match serde_json::from_str::<Option<UserProfile>>(&raw) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Discarding unreadable stored user profile: {}", e);
                None
            }
        }
    });

    match (token.is_empty(), user) {
        (false, Some(user)) => Session {
            token,
            user: Some(user),
        },
        (true, None) => Session::default(),
        _ => {
            log::warn!("Stored session is incomplete, clearing it");
            storage.remove(STORAGE_KEY_TOKEN);
            storage.remove(STORAGE_KEY_USER);
            Session::default()
        }
    }
}

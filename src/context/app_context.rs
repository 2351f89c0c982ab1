//! Application Context
//!
//! Owns one instance of every store plus the API client they share, and is
//! handed to views through Dioxus context instead of living in globals.
//!
//! Initialization rehydrates the session from durable storage; `logout` is
//! the teardown. Stores never reach into each other, so anything that needs
//! two of them (the profile page, say) goes through here.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::services::{ApiClient, HttpTransport, ReqwestTransport};
use crate::stores::{AssistantStore, ContentStore, ReferenceStore, SessionStore, WalletStore};
use crate::utils::storage::KeyValueStorage;

#[derive(Clone)]
pub struct AppContext {
    pub session: Rc<SessionStore>,
    pub articles: Rc<ContentStore>,
    pub wallet: Rc<WalletStore>,
    pub common: Rc<ReferenceStore>,
    pub assistant: Rc<AssistantStore>,
}

impl AppContext {
    pub fn new(api: ApiClient, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            session: Rc::new(SessionStore::restore(api.clone(), storage)),
            articles: Rc::new(ContentStore::new(api.clone())),
            wallet: Rc::new(WalletStore::new(api.clone())),
            common: Rc::new(ReferenceStore::new(api.clone())),
            assistant: Rc::new(AssistantStore::new(api)),
        }
    }

    /// Wire the context for the running target: reqwest (fetch on wasm32)
    /// and localStorage in the browser, memory elsewhere
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        #[cfg(target_arch = "wasm32")]
        let storage: Rc<dyn KeyValueStorage> = Rc::new(crate::utils::storage::BrowserStorage);
        #[cfg(not(target_arch = "wasm32"))]
        let storage: Rc<dyn KeyValueStorage> = Rc::new(crate::utils::storage::MemoryStorage::new());

        let transport: Rc<dyn HttpTransport> = Rc::new(ReqwestTransport::new(config)?);
        let api = ApiClient::new(config.api_base_url.clone(), transport);
        log::info!("API base URL: {}", api.base_url());
        Ok(Self::new(api, storage))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log out if `error` says the backend no longer accepts our token.
    /// Returns true when the session was ended.
    pub fn expire_session_on(&self, error: &ClientError) -> bool {
        if !error.is_unauthorized() || !self.is_authenticated() {
            return false;
        }
        log::warn!("Session rejected by the backend, logging out");
        self.logout();
        true
    }

    /// Log out and drop per-user cached data
    pub fn logout(&self) {
        self.session.logout();
        self.assistant.clear();
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}

/// Bumped on login and logout so components that read the session re-render
#[derive(Clone, Copy)]
pub struct SessionRevision(Signal<u64>);

impl SessionRevision {
    pub fn new() -> Self {
        Self(Signal::new(0))
    }

    /// Subscribe the calling component to session changes
    pub fn track(&self) {
        let _ = self.0.read();
    }

    pub fn bump(&mut self) {
        *self.0.write() += 1;
    }
}

impl Default for SessionRevision {
    fn default() -> Self {
        Self::new()
    }
}

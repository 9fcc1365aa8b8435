//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::{ProductStore, SeedError, UserStore};
use crate::services::{AuthService, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the credential store,
/// the product catalogue and the token service. Each instance is fully
/// independent, so tests build a fresh one per case.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    users: UserStore,
    products: ProductStore,
    tokens: TokenService,
}

impl AppState {
    /// Create state with empty stores.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_products(config, ProductStore::new())
    }

    /// Create state around an existing product catalogue.
    #[must_use]
    pub fn with_products(config: ApiConfig, products: ProductStore) -> Self {
        let tokens = TokenService::new(&config.token);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: UserStore::new(),
                products,
                tokens,
            }),
        }
    }

    /// Create state from configuration, preloading the seed catalogue if one
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the seed file cannot be loaded.
    pub fn from_config(config: ApiConfig) -> Result<Self, SeedError> {
        let products = match &config.seed_path {
            Some(path) => ProductStore::from_seed_file(path)?,
            None => ProductStore::new(),
        };
        Ok(Self::with_products(config, products))
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the product catalogue.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Authentication service bound to this state's stores.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.users, &self.inner.tokens)
    }
}

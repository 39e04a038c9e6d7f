//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shopfront_cache::FileStore;
use shopfront_commerce::cart::{CartSnapshots, CartStore, CouponBook};
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::checkout::{PostalLookup, ViaCepLookup, WhatsAppHandoff};
use shopfront_commerce::customer::StaticIdentity;
use shopfront_data::FetchClient;

use crate::config::{StoreConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Store configuration.
    pub config: StoreConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_in(cwd, config_path, output)
    }

    /// Load context rooted at `cwd`.
    pub fn load_in(cwd: PathBuf, config_path: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (StoreConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StoreConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StoreConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StoreConfig::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the catalog, either the configured file or the bundled one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Catalog::bundled().context("Failed to load bundled catalog"),
        }
    }

    /// Directory holding persisted state.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage: {}", dir.display()))?;
        let snapshots = CartSnapshots::with_key(storage, self.config.storage.cart_key.clone());
        Ok(CartStore::open(snapshots))
    }

    /// Accepted coupons.
    pub fn coupons(&self) -> CouponBook {
        self.config.coupon_book()
    }

    /// Current customer, as configured.
    pub fn identity(&self) -> StaticIdentity {
        StaticIdentity::from_profile(self.config.customer.clone())
    }

    /// Postal code lookup against the configured service.
    pub fn postal_lookup(&self) -> Arc<dyn PostalLookup> {
        let client = FetchClient::new().with_base_url(self.config.postal.base_url.clone());
        Arc::new(ViaCepLookup::with_client(client))
    }

    /// The store's WhatsApp recipient.
    pub fn handoff(&self) -> Result<WhatsAppHandoff> {
        WhatsAppHandoff::new(&self.config.store.whatsapp_number)
            .context("store.whatsapp_number is not a valid WhatsApp number")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

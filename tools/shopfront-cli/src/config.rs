//! Store configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_commerce::cart::{default_cart_key, Coupon, CouponBook};
use shopfront_commerce::checkout::{ShippingRates, VIACEP_BASE_URL};
use shopfront_commerce::customer::CustomerProfile;

/// Names searched for when no `--config` is given, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Store identity.
    #[serde(default)]
    pub store: StoreSection,

    /// Local cart storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Postal code lookup service.
    #[serde(default)]
    pub postal: PostalConfig,

    /// Placeholder shipping rates.
    #[serde(default)]
    pub shipping: ShippingRates,

    /// Accepted coupon codes.
    #[serde(default)]
    pub coupons: Vec<Coupon>,

    /// Signed-in customer, standing in for the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerProfile>,
}

impl StoreConfig {
    /// Load config from a file; `.json` files are JSON, everything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The accepted coupons.
    pub fn coupon_book(&self) -> CouponBook {
        self.coupons.iter().cloned().collect()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Store identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSection {
    /// Name shown in headers and order messages.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// WhatsApp number that receives orders.
    #[serde(default)]
    pub whatsapp_number: String,
}

fn default_store_name() -> String {
    "Shopfront Celulares".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            whatsapp_number: String::new(),
        }
    }
}

/// Local cart storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding persisted state, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".shopfront")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file; the bundled catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Postal code lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostalConfig {
    /// Service root URL.
    #[serde(default = "default_postal_base_url")]
    pub base_url: String,
}

fn default_postal_base_url() -> String {
    VIACEP_BASE_URL.to_string()
}

impl Default for PostalConfig {
    fn default() -> Self {
        Self {
            base_url: default_postal_base_url(),
        }
    }
}

/// Generate a default shopfront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Shopfront storefront configuration

[store]
name = "{name}"
# WhatsApp number that receives orders, with area code.
whatsapp_number = "11999990000"

[storage]
dir = ".shopfront"
cart_key = "{cart_key}"

[catalog]
# path = "catalog.json"

[postal]
base_url = "{postal}"

# Placeholder rates in centavos; PAC is free when every item ships free.
[shipping.pac]
price = 2490
min_days = 6
max_days = 10

[shipping.sedex]
price = 4590
min_days = 2
max_days = 4

[[coupons]]
code = "BEMVINDO10"
percent_off = 10

[[coupons]]
code = "PIX5"
percent_off = 5

# Signed-in customer used to prefill checkout.
# [customer]
# name = "Maria Silva"
# email = "maria@example.com"
"#,
        name = name,
        cart_key = default_cart_key(),
        postal = VIACEP_BASE_URL,
    )
}

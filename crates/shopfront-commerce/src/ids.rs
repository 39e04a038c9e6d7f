//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OrderRef where a ProductId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Stable catalog product identifier; also the cart line key.
    ProductId
);
define_id!(
    /// Short reference quoted in a handed-off order message.
    OrderRef
);

impl ProductId {
    /// Derive a variant-specific id (e.g. `iphone-15:preto:128gb`).
    ///
    /// Cart lines are keyed by product id alone, so two colours of the same
    /// phone collapse into one line unless the caller adds them under a
    /// variant id built here.
    pub fn with_variant(&self, color: Option<&str>, storage: Option<&str>) -> ProductId {
        let mut id = self.0.clone();
        for part in [color, storage].into_iter().flatten() {
            let slug = slugify(part);
            if !slug.is_empty() {
                id.push(':');
                id.push_str(&slug);
            }
        }
        ProductId(id)
    }

    /// The catalog id with any variant suffix removed.
    pub fn base(&self) -> ProductId {
        match self.0.split_once(':') {
            Some((base, _)) => ProductId::new(base),
            None => self.clone(),
        }
    }
}

impl OrderRef {
    /// Generate a new random order reference, e.g. `PED-3FQ9K2XA`.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 6] = rand::thread_rng().gen();
        let code: String = URL_SAFE_NO_PAD
            .encode(bytes)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { 'X' })
            .collect();
        Self(format!("PED-{}", code))
    }
}

/// Lowercase, ASCII-only, dash-separated form of a label.
pub(crate) fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for ch in label.trim().chars().flat_map(char::to_lowercase) {
        let ch = fold_accent(ch);
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Map common Portuguese accented letters to their ASCII base.
pub(crate) fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

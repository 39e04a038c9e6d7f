//! Customer identity as seen by the storefront.
//!
//! Sign-in itself belongs to an external identity provider. The storefront
//! only asks who is signed in, to greet the customer and prefill the
//! checkout contact form. Carts never depend on it.

use serde::{Deserialize, Serialize};

/// Display profile supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl CustomerProfile {
    /// Create a profile without an avatar.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    /// First word of the name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// The current visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Customer {
    #[default]
    Anonymous,
    SignedIn(CustomerProfile),
}

impl Customer {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Customer::SignedIn(_))
    }

    pub fn profile(&self) -> Option<&CustomerProfile> {
        match self {
            Customer::SignedIn(profile) => Some(profile),
            Customer::Anonymous => None,
        }
    }

    /// Name shown in the header.
    pub fn display_name(&self) -> &str {
        match self {
            Customer::SignedIn(profile) => &profile.name,
            Customer::Anonymous => "Visitante",
        }
    }
}

/// Source of the signed-in state.
pub trait IdentityProvider {
    /// The visitor for the current session.
    fn current(&self) -> Customer;
}

/// Identity provider with a fixed answer, configured up front.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    customer: Customer,
}

impl StaticIdentity {
    /// Nobody is signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// `profile` is signed in.
    pub fn signed_in(profile: CustomerProfile) -> Self {
        Self {
            customer: Customer::SignedIn(profile),
        }
    }

    /// Signed in when a profile is given, anonymous otherwise.
    pub fn from_profile(profile: Option<CustomerProfile>) -> Self {
        profile.map(Self::signed_in).unwrap_or_default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Customer {
        self.customer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        let customer = StaticIdentity::anonymous().current();
        assert!(!customer.is_signed_in());
        assert_eq!(customer.profile(), None);
        assert_eq!(customer.display_name(), "Visitante");
    }

    #[test]
    fn test_signed_in() {
        let profile = CustomerProfile::new("Maria Silva", "maria@example.com");
        let customer = StaticIdentity::from_profile(Some(profile)).current();
        assert!(customer.is_signed_in());
        assert_eq!(customer.display_name(), "Maria Silva");
        assert_eq!(customer.profile().unwrap().first_name(), "Maria");
    }
}

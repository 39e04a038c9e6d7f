//! Delivery address and postal code types.

use std::fmt;
use std::str::FromStr;

use crate::checkout::PostalAddress;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// An eight-digit Brazilian postal code (CEP).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse user input, ignoring spaces, dots and dashes.
    ///
    /// Anything that is not exactly eight digits afterwards is rejected
    /// with [`CommerceError::InvalidPostalCode`].
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let mut digits = String::with_capacity(8);
        for ch in input.trim().chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '.' | '-' => {}
                _ => return Err(CommerceError::InvalidPostalCode(input.trim().to_string())),
            }
        }
        if digits.len() != 8 {
            return Err(CommerceError::InvalidPostalCode(input.trim().to_string()));
        }
        Ok(Self(digits))
    }

    /// The eight digits without separator.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Display form, e.g. `01001-000`.
    pub fn display(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for PostalCode {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = CommerceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

/// A delivery address as entered on the checkout form.
///
/// Fields are kept as typed so the form can be edited freely; the postal
/// code is only validated by [`Address::is_complete`] and before lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Postal code as typed.
    pub postal_code: String,
    /// Street (logradouro).
    pub street: String,
    /// House or building number.
    pub number: String,
    /// Apartment, block, etc.
    #[serde(default)]
    pub complement: Option<String>,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter state code (UF).
    pub state: String,
}

impl Address {
    /// Check that every required field is filled and the postal code is valid.
    pub fn is_complete(&self) -> bool {
        PostalCode::parse(&self.postal_code).is_ok()
            && !self.street.trim().is_empty()
            && !self.number.trim().is_empty()
            && !self.neighborhood.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.state.trim().is_empty()
    }

    /// Names of the required fields that are still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if PostalCode::parse(&self.postal_code).is_err() {
            missing.push("CEP");
        }
        for (value, name) in [
            (&self.street, "rua"),
            (&self.number, "número"),
            (&self.neighborhood, "bairro"),
            (&self.city, "cidade"),
            (&self.state, "UF"),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    /// Format as a single line, e.g.
    /// `Praça da Sé, 100 - Sé, São Paulo/SP, CEP 01001-000`.
    pub fn one_line(&self) -> String {
        let mut street = format!("{}, {}", self.street.trim(), self.number.trim());
        if let Some(complement) = self.complement.as_deref().filter(|c| !c.trim().is_empty()) {
            street.push_str(&format!(" ({})", complement.trim()));
        }
        let cep = PostalCode::parse(&self.postal_code)
            .map(|c| c.display())
            .unwrap_or_else(|_| self.postal_code.trim().to_string());

        format!(
            "{} - {}, {}/{}, CEP {}",
            street,
            self.neighborhood.trim(),
            self.city.trim(),
            self.state.trim(),
            cep
        )
    }

    /// Fill the fields a postal lookup knows about.
    ///
    /// Number and complement stay as typed unless the complement is empty
    /// and the lookup has one.
    pub fn apply_lookup(&mut self, found: &PostalAddress) {
        self.postal_code = found.postal_code.display();
        self.street = found.street.clone();
        self.neighborhood = found.neighborhood.clone();
        self.city = found.city.clone();
        self.state = found.state.clone();
        if self.complement.as_deref().map_or(true, |c| c.trim().is_empty()) {
            self.complement = found.complement.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            postal_code: "01001000".into(),
            street: "Praça da Sé".into(),
            number: "100".into(),
            complement: None,
            neighborhood: "Sé".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        }
    }

    #[test]
    fn test_postal_code_parse() {
        assert_eq!(PostalCode::parse("01001-000").unwrap().digits(), "01001000");
        assert_eq!(PostalCode::parse(" 01.001-000 ").unwrap().display(), "01001-000");
        assert!(PostalCode::parse("0100100").is_err());
        assert!(PostalCode::parse("010010000").is_err());
        assert!(matches!(
            PostalCode::parse("abcde-fgh"),
            Err(CommerceError::InvalidPostalCode(_))
        ));
        assert!(PostalCode::parse("").is_err());
    }

    #[test]
    fn test_postal_code_serde() {
        let code: PostalCode = serde_json::from_str("\"01001-000\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"01001000\"");
        assert!(serde_json::from_str::<PostalCode>("\"123\"").is_err());
    }

    #[test]
    fn test_address_complete() {
        let mut a = address();
        assert!(a.is_complete());
        assert!(a.missing_fields().is_empty());

        a.number = " ".into();
        a.postal_code = "123".into();
        assert!(!a.is_complete());
        assert_eq!(a.missing_fields(), vec!["CEP", "número"]);
    }

    #[test]
    fn test_one_line() {
        let mut a = address();
        assert_eq!(a.one_line(), "Praça da Sé, 100 - Sé, São Paulo/SP, CEP 01001-000");
        a.complement = Some("apto 12".into());
        assert_eq!(
            a.one_line(),
            "Praça da Sé, 100 (apto 12) - Sé, São Paulo/SP, CEP 01001-000"
        );
    }

    #[test]
    fn test_apply_lookup_keeps_number() {
        let mut a = Address {
            number: "42".into(),
            complement: Some("casa 2".into()),
            ..Default::default()
        };
        let found = PostalAddress {
            postal_code: PostalCode::parse("20040-020").unwrap(),
            street: "Avenida Rio Branco".into(),
            complement: Some("lado par".into()),
            neighborhood: "Centro".into(),
            city: "Rio de Janeiro".into(),
            state: "RJ".into(),
        };
        a.apply_lookup(&found);
        assert_eq!(a.postal_code, "20040-020");
        assert_eq!(a.street, "Avenida Rio Branco");
        assert_eq!(a.number, "42");
        assert_eq!(a.complement.as_deref(), Some("casa 2"));
        assert!(a.is_complete());
    }
}

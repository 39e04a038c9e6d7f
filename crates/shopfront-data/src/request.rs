//! Outbound request description.

use std::collections::HashMap;

/// A GET request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Create a GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_replace_by_key() {
        let req = Request::get("https://viacep.com.br/ws/01001000/json/")
            .header("Accept", "text/html")
            .header("Accept", "application/json");

        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("application/json"));
    }
}

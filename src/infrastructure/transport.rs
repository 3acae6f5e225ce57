//! Transport boundary
//!
//! Services talk to the site through [`Transport`] only. The production
//! implementation is [`crate::infrastructure::HttpClient`]; tests script
//! responses in memory.

use crate::infrastructure::parsing_error::TransportError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    /// Form-encoded POST
    Post,
}

/// One request, addressed by a path relative to the site root or an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub target: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    /// Marks the request as an AJAX call (`X-Requested-With: XMLHttpRequest`)
    pub ajax: bool,
}

impl TransportRequest {
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            target: target.into(),
            query: Vec::new(),
            form: Vec::new(),
            ajax: false,
        }
    }

    /// AJAX form POST
    pub fn post(target: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ajax: true,
            ..Self::get(target)
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_form(mut self, key: &str, value: impl ToString) -> Self {
        self.form.push((key.to_string(), value.to_string()));
        self
    }

    pub fn ajax(mut self) -> Self {
        self.ajax = true;
        self
    }

    /// Value of a query or form field, for diagnostics and tests
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .chain(self.form.iter())
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            set_cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.set_cookies.push(cookie.into());
        self
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP collaborator used by every service
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = TransportRequest::post("ajax/get_cdn_series/")
            .with_form("id", 646)
            .with_form("action", "get_stream");
        assert_eq!(request.method, Method::Post);
        assert!(request.ajax);
        assert_eq!(request.param("id"), Some("646"));

        let request = TransportRequest::get("search/").with_query("q", "тяжкие");
        assert!(!request.ajax);
        assert_eq!(request.param("q"), Some("тяжкие"));
        assert_eq!(request.param("page"), None);
    }

    #[test]
    fn test_json_body() {
        let response = TransportResponse::ok(r#"{"success":true}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["success"], true);
    }
}

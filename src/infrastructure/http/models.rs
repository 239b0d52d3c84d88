//! HTTP models - Infrastructure concerns
//!
//! Framework-free request and response shapes the dispatcher works with.
//! The warp layer only converts to and from these.

use bytes::Bytes;
use std::collections::HashMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// One inbound request after parameter decoding
#[derive(Debug, Clone)]
pub struct PoolRequest {
    pub request_id: String,
    pub method: String,
    pub path: String,
    /// Query and form parameters, form values win
    pub params: HashMap<String, String>,
    pub user_agent: Option<String>,
}

impl PoolRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Client identifier handed to scoring, empty when not declared
    pub fn client_id(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("")
    }

    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }
}

/// Everything needed to write the reply
#[derive(Debug, Clone, PartialEq)]
pub struct PoolResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Bytes,
    /// Redirect target
    pub location: Option<String>,
}

impl PoolResponse {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            location: None,
        }
    }

    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::new(200, CONTENT_TYPE_JSON, body)
    }

    pub fn text(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, CONTENT_TYPE_TEXT, body)
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            ..Self::new(302, CONTENT_TYPE_HTML, Bytes::new())
        }
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or("")
    }
}

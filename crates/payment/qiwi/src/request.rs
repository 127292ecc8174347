use std::fmt::Debug;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use strum::{AsRefStr, Display};

use crate::error::QiwiError;

pub const API_HOST: &str = "api.qiwi.com";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub prv_id: String,
    pub api_id: String,
    pub api_password: String,
}

impl Credentials {
    pub fn new(
        prv_id: impl Into<String>,
        api_id: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Self {
        Credentials {
            prv_id: prv_id.into(),
            api_id: api_id.into(),
            api_password: api_password.into(),
        }
    }

    pub fn authorization(&self) -> String {
        let key = STANDARD.encode(format!("{}:{}", self.api_id, self.api_password));
        format!("Basic {}", key)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("prv_id", &self.prv_id)
            .field("api_id", &self.api_id)
            .field("api_password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Patch,
}

/// Everything a transport needs to issue one call.
#[derive(Clone, PartialEq)]
pub struct RequestDescriptor {
    pub host: String,
    pub path: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RequestDescriptor {
    pub fn build(
        credentials: &Credentials,
        suffix: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<RequestDescriptor, QiwiError> {
        // The provider expects JSON here even though the declared type is form-urlencoded.
        let headers = vec![
            ("Accept".to_owned(), "text/json".to_owned()),
            (
                "Content-Type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            ),
            ("Authorization".to_owned(), credentials.authorization()),
        ];
        let body = serde_json::to_string(&body.unwrap_or(Value::Null))
            .map_err(QiwiError::Serialize)?;

        Ok(RequestDescriptor {
            host: API_HOST.to_owned(),
            path: format!("/api/v2/prv/{}/bills/{}", credentials.prv_id, suffix),
            method,
            headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl Debug for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case("Authorization") {
                    (key.as_str(), "***")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect::<Vec<_>>();
        f.debug_struct("RequestDescriptor")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

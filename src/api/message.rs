//! API-Gateway proxy request and response shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_parameters: Option<BTreeMap<String, String>>,
    /// Raw JSON text, as the gateway delivers it
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: &str, path: &str) -> Self {
        ApiRequest {
            http_method: method.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_id(mut self, id: &str) -> Self {
        self.path_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert("id".to_string(), id.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Response with a JSON body and the CORS headers
    pub fn json(status_code: u16, body: &Value) -> Self {
        ApiResponse {
            status_code,
            headers: default_headers(),
            body: body.to_string(),
        }
    }

    /// Preflight answer: headers only
    pub fn empty(status_code: u16) -> Self {
        ApiResponse {
            status_code,
            headers: default_headers(),
            body: String::new(),
        }
    }

    /// Body parsed back into JSON; `Null` for an empty body
    pub fn body_json(&self) -> serde_json::Result<Value> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}

fn default_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_gateway_json() {
        let raw = r#"{
            "httpMethod": "PUT",
            "path": "/entries/entry-1",
            "pathParameters": {"id": "entry-1"},
            "body": "{\"title\":\"X\"}",
            "headers": {"Host": "example.com"}
        }"#;
        let request: ApiRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.http_method, "PUT");
        assert_eq!(
            request.path_parameters.unwrap().get("id").map(String::as_str),
            Some("entry-1")
        );
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"X"}"#));
    }

    #[test]
    fn test_request_null_fields() {
        let raw = r#"{"httpMethod": "GET", "path": "/entries", "pathParameters": null, "body": null}"#;
        let request: ApiRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request, ApiRequest::new("GET", "/entries"));
    }

    #[test]
    fn test_response_carries_cors_headers() {
        let response = ApiResponse::empty(200);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(
            response.headers["Access-Control-Allow-Methods"],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(response.body_json().unwrap(), Value::Null);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ApiResponse::json(201, &serde_json::json!({"message": "ok"}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["body"], r#"{"message":"ok"}"#);
    }
}

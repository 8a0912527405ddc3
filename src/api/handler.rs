//! HTTP handler: routes proxy requests onto the entry repository

use crate::api::message::{ApiRequest, ApiResponse};
use crate::application::EntryRepository;
use crate::domain::{EntryPatch, NewEntry};
use crate::error::{BitacoraError, Result};
use crate::infrastructure::{BlobStore, KeyValueStore};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::OnceLock;

fn entry_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?:^|/)entries/([^/]+)/?$").unwrap())
}

/// Handle one request. Never fails: every error becomes a JSON response.
pub fn handle<K, B>(repository: &EntryRepository<K, B>, request: &ApiRequest) -> ApiResponse
where
    K: KeyValueStore,
    B: BlobStore,
{
    let method = request.http_method.to_ascii_uppercase();
    if method == "OPTIONS" {
        return ApiResponse::empty(200);
    }

    let id = entry_id(request);
    tracing::debug!(method = %method, path = %request.path, id = ?id, "api request");

    let result = match (method.as_str(), id.as_deref()) {
        ("GET", None) => repository
            .get_all()
            .map(|entries| ApiResponse::json(200, &json!({ "entries": entries }))),
        ("GET", Some(id)) => repository
            .get_by_id(id)
            .map(|entry| ApiResponse::json(200, &json!({ "entry": entry }))),
        ("POST", None) => parse_body::<NewEntry>(request)
            .and_then(|new| repository.create(new))
            .map(|entry| {
                ApiResponse::json(
                    201,
                    &json!({ "message": "Entry created successfully", "entry": entry }),
                )
            }),
        ("PUT", Some(id)) => parse_body::<EntryPatch>(request)
            .and_then(|patch| repository.update(id, patch))
            .map(|entry| {
                ApiResponse::json(
                    200,
                    &json!({ "message": "Entry updated successfully", "entry": entry }),
                )
            }),
        ("DELETE", Some(id)) => repository
            .delete(id)
            .map(|()| ApiResponse::json(200, &json!({ "message": "Entry deleted successfully" }))),
        _ => Ok(ApiResponse::json(
            405,
            &json!({ "error": "Method not allowed" }),
        )),
    };

    result.unwrap_or_else(|e| error_response(&e))
}

/// Entry id from the path parameters, or the segment after `/entries/`
fn entry_id(request: &ApiRequest) -> Option<String> {
    let from_parameters = request
        .path_parameters
        .as_ref()
        .and_then(|params| params.get("id"))
        .filter(|id| !id.is_empty())
        .cloned();

    from_parameters.or_else(|| {
        entry_path_regex()
            .captures(&request.path)
            .map(|caps| caps[1].to_string())
    })
}

fn parse_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T> {
    let body = request
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| BitacoraError::Validation("Request body is required".to_string()))?;
    Ok(serde_json::from_str(body)?)
}

fn error_response(error: &BitacoraError) -> ApiResponse {
    let status = error.status_code();
    let body = match error {
        BitacoraError::Validation(msg) => json!({ "error": msg }),
        BitacoraError::Json(e) => json!({ "error": "Invalid JSON body", "message": e.to_string() }),
        BitacoraError::NotFound(_) => json!({ "error": "Entry not found" }),
        _ => {
            tracing::error!(error = %error, "api request failed");
            json!({ "error": "Internal server error", "message": error.to_string() })
        }
    };
    ApiResponse::json(status, &body)
}

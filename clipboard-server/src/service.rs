//! Route dispatch: translates parsed HTTP requests into store calls

use clipboard_core::Store;
use serde::Serialize;

use crate::http::{Method, Request, Response, Status};

/// Body of a 404 for an identifier that was never set or has expired
pub const NOT_FOUND_MESSAGE: &str = "Clipboard not found";

/// Body of a successful POST
pub const RECORDED_MESSAGE: &str = "Clip board recorded successfully";

/// Body of a 400 for a POST missing `id` or `value`
pub const BAD_POST_MESSAGE: &str = "Sorry something went wrong";

#[derive(Serialize)]
struct Clip<'a> {
    id: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct Recorded<'a> {
    message: &'a str,
    id: &'a str,
    value: &'a str,
}

/// Truncates an identifier for logging, so log lines stay short even when
/// clients use long identifiers
fn truncate_id_for_log(id: &str) -> String {
    const MAX_LOG_LEN: usize = 16;
    if id.len() <= MAX_LOG_LEN {
        id.to_string()
    } else {
        let mut end = MAX_LOG_LEN;
        while !id.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &id[..end])
    }
}

/// The HTTP request handler
///
/// Cheap to clone; every connection task holds one, all sharing the same
/// store.
#[derive(Clone)]
pub struct ClipboardService {
    store: Store,
}

impl ClipboardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn handle(&self, request: &Request) -> Response {
        match request.method {
            Method::Get => self.handle_get(request),
            Method::Post => self.handle_post(request),
            Method::Other(_) => Response::method_not_allowed(),
        }
    }

    fn handle_get(&self, request: &Request) -> Response {
        let Some(id) = request.query_param("id") else {
            return Response::message(Status::BadRequest, "missing `id` parameter");
        };
        tracing::debug!("GET {}", truncate_id_for_log(id));

        match self.store.get(id) {
            Some(value) => Response::json(Status::Ok, &Clip { id, value: &value }),
            None => Response::message(Status::NotFound, NOT_FOUND_MESSAGE),
        }
    }

    fn handle_post(&self, request: &Request) -> Response {
        let (Some(id), Some(value)) = (request.query_param("id"), request.query_param("value"))
        else {
            return Response::message(Status::BadRequest, BAD_POST_MESSAGE);
        };
        tracing::debug!("SET {}", truncate_id_for_log(id));

        self.store.set(id, value);
        Response::json(
            Status::Ok,
            &Recorded {
                message: RECORDED_MESSAGE,
                id,
                value,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipboard_core::StoreConfig;
    use std::collections::HashMap;
    use std::time::Duration;

    fn request(method: Method, pairs: &[(&str, &str)]) -> Request {
        let mut query = HashMap::new();
        for (key, value) in pairs {
            query.insert(key.to_string(), value.to_string());
        }
        Request {
            method,
            path: "/".to_string(),
            query,
            keep_alive: true,
        }
    }

    fn test_service() -> ClipboardService {
        // Long sweep interval so the background task stays out of the way
        let config = StoreConfig::default().with_sweep_interval(Duration::from_secs(3600));
        ClipboardService::new(Store::with_config(config))
    }

    fn body_json(response: &Response) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get_roundtrip() {
        let service = test_service();

        let response = service.handle(&request(
            Method::Post,
            &[("id", "note1"), ("value", "hello")],
        ));
        assert_eq!(response.status, Status::Ok);
        let body = body_json(&response);
        assert_eq!(body["message"], RECORDED_MESSAGE);
        assert_eq!(body["id"], "note1");
        assert_eq!(body["value"], "hello");

        let response = service.handle(&request(Method::Get, &[("id", "note1")]));
        assert_eq!(response.status, Status::Ok);
        let body = body_json(&response);
        assert_eq!(body["id"], "note1");
        assert_eq!(body["value"], "hello");
    }

    #[tokio::test]
    async fn test_get_missing_id_is_bad_request() {
        let service = test_service();
        let response = service.handle(&request(Method::Get, &[]));
        assert_eq!(response.status, Status::BadRequest);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = test_service();
        let response = service.handle(&request(Method::Get, &[("id", "missing")]));
        assert_eq!(response.status, Status::NotFound);
        assert_eq!(body_json(&response)["message"], NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_post_without_value_is_bad_request() {
        let service = test_service();
        let response = service.handle(&request(Method::Post, &[("id", "note1")]));
        assert_eq!(response.status, Status::BadRequest);
        assert_eq!(body_json(&response)["message"], BAD_POST_MESSAGE);
    }

    #[tokio::test]
    async fn test_post_without_id_is_bad_request() {
        let service = test_service();
        let response = service.handle(&request(Method::Post, &[("value", "hello")]));
        assert_eq!(response.status, Status::BadRequest);
    }

    #[tokio::test]
    async fn test_other_method_is_not_allowed() {
        let service = test_service();
        let response = service.handle(&request(Method::Other("DELETE".to_string()), &[]));
        assert_eq!(response.status, Status::MethodNotAllowed);
        assert_eq!(response.allow, Some("GET, POST"));
    }

    #[tokio::test]
    async fn test_overwrite_returns_latest_value() {
        let service = test_service();

        service.handle(&request(Method::Post, &[("id", "note1"), ("value", "v1")]));
        service.handle(&request(Method::Post, &[("id", "note1"), ("value", "v2")]));

        let response = service.handle(&request(Method::Get, &[("id", "note1")]));
        assert_eq!(body_json(&response)["value"], "v2");
    }

    #[test]
    fn test_truncate_id_for_log() {
        assert_eq!(truncate_id_for_log("short"), "short");
        assert_eq!(
            truncate_id_for_log("a-very-long-identifier"),
            "a-very-long-iden..."
        );
        // Never splits a multibyte character
        let id = "ééééééééééé"; // 22 bytes
        assert!(truncate_id_for_log(id).ends_with("..."));
    }
}

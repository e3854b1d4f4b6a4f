//! Custom assertion helpers
//!
//! Provides assertions for the structured error body every failing
//! endpoint returns.

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert an error response: status plus `{"success": false, "message": ...}`
pub fn assert_error_response(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], serde_json::Value::Bool(false));
    assert_eq!(body["message"], message);
}

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use once_cell::sync::OnceCell;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
}

/// AppState backed by a MockDatabase that will serve the given query result
/// batches in order.
pub fn mock_state(mock: MockDatabase) -> AppState {
    AppState::new(mock.into_connection(), test_security())
}

pub fn empty_mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn user_model(id: i64, email: &str, password_hash: &str) -> backend::entities::users::Model {
    let now = OffsetDateTime::now_utc();
    backend::entities::users::Model {
        id,
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn post_model(id: i64, title: &str, content: &str) -> backend::entities::posts::Model {
    let now = OffsetDateTime::now_utc();
    backend::entities::posts::Model {
        id,
        title: title.to_string(),
        content: content.to_string(),
        published: true,
        created_at: now,
        updated_at: now,
    }
}

/// Helper function to check that the trace_id in the response body matches the x-trace-id header
pub fn assert_trace_id_matches(json: &Value, header_trace_id: &str) {
    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, header_trace_id,
        "trace_id in body should match x-trace-id header"
    );
}

/// Helper function to validate that a response follows the ProblemDetails structure
/// and that trace_id matches the x-trace-id header
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) {
    // Assert status code
    assert_eq!(resp.status().as_u16(), expected_status);

    // Extract headers before consuming the response
    let headers = resp.headers().clone();

    // x-trace-id (header names are case-insensitive; use a typed HeaderName)
    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8");
    assert!(
        !trace_id.is_empty(),
        "x-trace-id header should not be empty"
    );

    // Content-Type may include parameters (e.g., charset)
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    // Header rules (defined in src/error.rs error_response):
    // - 401: WWW-Authenticate: Bearer (no Retry-After)
    // - 503: Retry-After (no WWW-Authenticate)
    match expected_status {
        401 => {
            // RFC 7235: 401 must have WWW-Authenticate
            let www_auth = headers.get("WWW-Authenticate");
            assert!(
                www_auth.is_some(),
                "401 responses must have WWW-Authenticate header per RFC 7235"
            );
            assert_eq!(www_auth.unwrap().to_str().unwrap(), "Bearer");
            assert!(
                headers.get("Retry-After").is_none(),
                "401 responses must not have Retry-After header"
            );
        }
        503 => {
            // RFC 7231: 503 should have Retry-After
            let retry_after = headers.get("Retry-After");
            assert!(
                retry_after.is_some(),
                "503 responses must have Retry-After header per RFC 7231"
            );
            assert!(
                headers.get("WWW-Authenticate").is_none(),
                "503 responses must not have WWW-Authenticate header"
            );
        }
        _ => {
            assert!(
                headers.get("WWW-Authenticate").is_none(),
                "{expected_status} responses must not have WWW-Authenticate header"
            );
            assert!(
                headers.get("Retry-After").is_none(),
                "{expected_status} responses must not have Retry-After header"
            );
        }
    }

    // Validate body structure
    let body: Value = actix_web::test::read_body_json(resp).await;

    assert_eq!(body["status"], expected_status);
    assert_eq!(body["code"], expected_code);
    assert_eq!(body["detail"], expected_detail);
    assert!(
        body["type"]
            .as_str()
            .expect("type field should be a string")
            .starts_with("https://quillpad.dev/errors/"),
        "type should point at the error catalog"
    );
    assert!(
        !body["title"]
            .as_str()
            .expect("title field should be a string")
            .is_empty(),
        "title should not be empty"
    );

    assert_trace_id_matches(&body, trace_id);
}

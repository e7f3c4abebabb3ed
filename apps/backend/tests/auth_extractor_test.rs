mod common;

use std::time::{Duration, SystemTime};

use actix_web::{test, web, App};
use backend::auth::jwt::mint_access_token;
use backend::extractors::current_user::CurrentUser;
use backend::middleware::request_trace::RequestTrace;
use backend::state::app_state::AppState;
use backend::AppError;
use common::{assert_problem_details_structure, empty_mock, mock_state, test_security, user_model};
use serde_json::Value;

/// Test endpoint gated by the CurrentUser guard
async fn protected_endpoint(current_user: CurrentUser) -> Result<web::Json<Value>, AppError> {
    let response = serde_json::json!({
        "id": current_user.id,
        "email": current_user.email,
    });
    Ok(web::Json(response))
}

async fn call_protected(
    app_state: AppState,
    authorization: Option<&str>,
) -> actix_web::dev::ServiceResponse {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(app_state))
            .service(web::resource("/test").to(protected_endpoint)),
    )
    .await;

    let mut req = test::TestRequest::get().uri("/test");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value.to_string()));
    }

    test::call_service(&app, req.to_request()).await
}

#[actix_web::test]
async fn valid_token_and_known_user_resolves() {
    let mock = empty_mock().append_query_results([vec![user_model(7, "a@example.com", "x")]]);
    let state = mock_state(mock);

    let token = mint_access_token(7, SystemTime::now(), &test_security()).unwrap();
    let resp = call_protected(state, Some(&format!("Bearer {token}"))).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["email"], "a@example.com");
}

#[actix_web::test]
async fn valid_token_for_unknown_user_is_rejected() {
    // The row is gone: a verified token must NOT fall through as an
    // anonymous identity, it is a 401 like any other auth failure.
    let mock = empty_mock().append_query_results([Vec::<backend::entities::users::Model>::new()]);
    let state = mock_state(mock);

    let token = mint_access_token(7, SystemTime::now(), &test_security()).unwrap();
    let resp = call_protected(state, Some(&format!("Bearer {token}"))).await;

    assert_problem_details_structure(resp, 401, "UNAUTHORIZED", "Could not validate credentials")
        .await;
}

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let state = mock_state(empty_mock());

    let resp = call_protected(state, None).await;

    assert_problem_details_structure(resp, 401, "UNAUTHORIZED", "Could not validate credentials")
        .await;
}

#[actix_web::test]
async fn malformed_authorization_headers_are_rejected() {
    for header in ["Token abc123", "Bearer", "Bearer ", "abc123", "Basic abc"] {
        let state = mock_state(empty_mock());
        let resp = call_protected(state, Some(header)).await;

        assert_eq!(
            resp.status().as_u16(),
            401,
            "expected 401 for header {header:?}"
        );
    }
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let state = mock_state(empty_mock());

    let resp = call_protected(state, Some("Bearer not-a-jwt")).await;

    assert_problem_details_structure(resp, 401, "UNAUTHORIZED", "Could not validate credentials")
        .await;
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let state = mock_state(empty_mock());

    // Minted 40 minutes ago against a 30-minute TTL.
    let issued = SystemTime::now() - Duration::from_secs(40 * 60);
    let token = mint_access_token(7, issued, &test_security()).unwrap();
    let resp = call_protected(state, Some(&format!("Bearer {token}"))).await;

    assert_problem_details_structure(resp, 401, "UNAUTHORIZED", "Could not validate credentials")
        .await;
}

#[actix_web::test]
async fn token_signed_with_other_secret_is_rejected() {
    let state = mock_state(empty_mock());

    let other = backend::state::security_config::SecurityConfig::new("other-secret".as_bytes());
    let token = mint_access_token(7, SystemTime::now(), &other).unwrap();
    let resp = call_protected(state, Some(&format!("Bearer {token}"))).await;

    assert_problem_details_structure(resp, 401, "UNAUTHORIZED", "Could not validate credentials")
        .await;
}

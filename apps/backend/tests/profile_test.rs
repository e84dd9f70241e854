mod common;

use std::sync::Arc;

use accounts_backend::auth::{FixedClock, TokenCodec};
use accounts_backend::middleware::RequestTrace;
use accounts_backend::repos::users::UserStore;
use accounts_backend::routes;
use accounts_backend::state::SecurityConfig;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use common::{clock_at, seed_user, test_state, T0, TEST_SECRET};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_reading_another_users_profile_is_forbidden() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    let (_, alice_token) = seed_user(&state, "alice@example.com").await;
    let (bob_id, _) = seed_user(&state, "bob@example.com").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/profile/{bob_id}"))
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "FORBIDDEN", StatusCode::FORBIDDEN, None)
        .await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/profile/{bob_id}"))
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({ "name": "Hijacked", "email": "hijack@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let bob = state.users.find_by_id(bob_id).await.unwrap().unwrap();
    assert_eq!(bob.email, "bob@example.com");
}

#[actix_web::test]
async fn test_update_own_profile() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    let (id, token) = seed_user(&state, "carol@example.com").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/profile/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Carol Renamed", "email": "carol.new@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Carol Renamed");
    assert_eq!(body["email"], "carol.new@example.com");

    // The token still carries the old email; access is keyed on the subject id.
    let req = test::TestRequest::get()
        .uri(&format!("/api/profile/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "carol.new@example.com");
}

#[actix_web::test]
async fn test_update_to_taken_email_conflicts() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    let (id, token) = seed_user(&state, "dave@example.com").await;
    seed_user(&state, "erin@example.com").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/profile/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Dave", "email": "erin@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EMAIL_IN_USE",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_update_requires_name_and_email() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    let (id, token) = seed_user(&state, "frank@example.com").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/profile/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "MISSING_FIELDS",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_valid_token_for_unknown_subject_is_not_found() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let codec = TokenCodec::with_clock(
        &SecurityConfig::new(TEST_SECRET),
        Arc::new(FixedClock::new(T0)),
    )
    .unwrap();
    let token = codec.encode(999, "ghost@example.com").unwrap();

    let req = test::TestRequest::get()
        .uri("/api/profile/999")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("User not found"),
    )
    .await;
}

#[actix_web::test]
async fn test_non_numeric_profile_id_is_rejected() {
    let state = test_state(clock_at(T0));
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    let (_, token) = seed_user(&state, "grace@example.com").await;

    let req = test::TestRequest::get()
        .uri("/api/profile/abc")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "INVALID_PATH",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert!(!problem.detail.contains("abc"));
    assert!(!problem.detail.contains("parse"));
}

#[actix_web::test]
async fn test_non_numeric_profile_id_without_token_is_unauthorized() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(test_state(clock_at(T0))))
            .configure(routes::configure),
    )
    .await;

    for req in [
        test::TestRequest::get().uri("/api/profile/abc").to_request(),
        test::TestRequest::put()
            .uri("/api/profile/abc")
            .set_json(json!({ "name": "X", "email": "x@example.com" }))
            .to_request(),
    ] {
        common::assert_unauthorized(test::call_service(&app, req).await).await;
    }
}

#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use accounts_backend::auth::FixedClock;
use accounts_backend::config::RuntimeEnv;
use accounts_backend::services::accounts;
use accounts_backend::services::passwords::BcryptHasher;
use accounts_backend::state::{build_state, AppState, SecurityConfig};
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

pub const TEST_SECRET: &str = "integration_test_secret_key";

pub const SEED_PASSWORD: &str = "seedpassword123";

/// Fixed issue time for tokens minted through the test app.
pub const T0: i64 = 1_000;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// App state over a fresh in-memory store, a controllable clock, and the
/// cheapest bcrypt cost.
pub fn test_state(clock: Arc<FixedClock>) -> AppState {
    build_state()
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_clock(clock)
        .with_hasher(Arc::new(BcryptHasher::new(4)))
        .with_env(RuntimeEnv::Dev)
        .build()
        .expect("test state should build")
}

pub fn clock_at(now: i64) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now))
}

/// Assert a 401 problem-details body that says nothing about why.
pub async fn assert_unauthorized(resp: ServiceResponse<BoxBody>) {
    let problem = backend_test_support::problem_details::assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Authentication required"),
    )
    .await;
    assert_eq!(problem.detail, "Authentication required");
}

pub fn register_body(name: &str, email: &str, password: &str) -> Value {
    serde_json::json!({ "name": name, "email": email, "password": password })
}

pub fn login_body(email: &str, password: &str) -> Value {
    serde_json::json!({ "email": email, "password": password })
}

/// Register and log in a user straight through the account service.
/// Returns the new id and its access token.
pub async fn seed_user(state: &AppState, email: &str) -> (i64, String) {
    let user = accounts::register(
        state.users.as_ref(),
        state.hasher.as_ref(),
        "Seeded User",
        email,
        SEED_PASSWORD,
    )
    .await
    .expect("seed user should register");

    let (_, token) = accounts::login(
        state.users.as_ref(),
        state.hasher.as_ref(),
        &state.codec,
        email,
        SEED_PASSWORD,
    )
    .await
    .expect("seed user should log in");

    (user.id, token.into_string())
}

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::TOKEN_LIFETIME_SECS;
use crate::config::server::RuntimeEnv;
use crate::error::AppError;
use crate::extractors::TOKEN_COOKIE;
use crate::repos::users::PublicUser;
use crate::services::accounts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

fn token_cookie(token: String, env: RuntimeEnv) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(env.secure_cookies())
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(TOKEN_LIFETIME_SECS))
        .finish()
}

async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = accounts::register(
        app_state.users.as_ref(),
        app_state.hasher.as_ref(),
        &req.name,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        success: true,
        user,
    }))
}

/// Verify credentials, return the token in the body and as an HttpOnly cookie.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user, token) = accounts::login(
        app_state.users.as_ref(),
        app_state.hasher.as_ref(),
        &app_state.codec,
        &req.email,
        &req.password,
    )
    .await?;

    let token = token.into_string();
    let cookie = token_cookie(token.clone(), app_state.runtime_env);

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        success: true,
        user,
        token,
    }))
}

/// Tokens are stateless, so logging out only clears the client's cookie.
async fn logout(app_state: web::Data<AppState>) -> HttpResponse {
    let mut cookie = token_cookie(String::new(), app_state.runtime_env);
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(LogoutResponse {
        success: true,
        message: "Logged out successfully",
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::post().to(logout)));
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::SameSite;

    use super::token_cookie;
    use crate::config::server::RuntimeEnv;

    #[test]
    fn test_token_cookie_attributes() {
        let cookie = token_cookie("abc".to_string(), RuntimeEnv::Prod);
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(604_800));

        let dev = token_cookie("abc".to_string(), RuntimeEnv::Dev);
        assert_eq!(dev.secure(), Some(false));
    }
}

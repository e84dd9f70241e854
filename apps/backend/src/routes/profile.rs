use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::accounts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

// The caller is extracted before the path so unauthenticated requests get 401.
async fn get_profile(
    current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user =
        accounts::get_profile(app_state.users.as_ref(), current_user.id, path.into_inner())
            .await?;

    Ok(HttpResponse::Ok().json(user))
}

async fn update_profile(
    current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = accounts::update_profile(
        app_state.users.as_ref(),
        current_user.id,
        path.into_inner(),
        &req.name,
        &req.email,
    )
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile/{id}")
            .route(web::get().to(get_profile))
            .route(web::put().to(update_profile)),
    );
}

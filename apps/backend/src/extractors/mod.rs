pub mod auth_token;
pub mod current_user;

pub use auth_token::{AuthToken, TOKEN_COOKIE};
pub use current_user::CurrentUser;

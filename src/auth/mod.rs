use axum::Router;

use crate::state::AppState;

mod dto;
mod extractors;
pub mod handlers;
mod jwt;
mod password;
mod repo;
mod validate;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}

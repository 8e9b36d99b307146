//! Company Routes

use crate::api::handlers::company_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建公司路由器
pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/companies/search", get(search_by_name))
        .route("/companies/:id", get(get_company))
}

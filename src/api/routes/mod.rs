//! Routes 模块
//!
//! 定义 API 路由。

pub mod company_routes;
pub mod search_routes;

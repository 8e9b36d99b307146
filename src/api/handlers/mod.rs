//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod company_handler;
pub mod search_handler;

pub use company_handler::*;
pub use search_handler::*;

//! Manufind - 制造企业自然语言搜索服务
//!
//! 将中英西三语的自然语言查询转换为结构化条件，查询公司数据存储并按相关性排序；
//! 存储不可用时退回内置演示数据。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

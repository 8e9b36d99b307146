//! 搜索 DTO
//!
//! 定义搜索相关的请求和响应数据结构。

use serde::{Deserialize, Serialize};

use crate::models::company::Company;

/// GET 搜索查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryParams {
    /// 自然语言查询
    pub q: Option<String>,
    /// 返回结果数量
    pub limit: Option<usize>,
    /// 是否启用语言模型辅助
    pub assist: Option<bool>,
}

/// POST 搜索请求
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// 自然语言查询
    pub query: String,
    /// 返回结果数量
    pub limit: Option<usize>,
    /// 是否启用语言模型辅助
    pub use_assist: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: None,
            use_assist: true,
        }
    }
}

/// 按名称搜索参数
#[derive(Debug, Default, Deserialize)]
pub struct NameSearchParams {
    pub name: Option<String>,
}

/// 公司列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
    pub total: usize,
}

impl From<Vec<Company>> for CompanyListResponse {
    fn from(companies: Vec<Company>) -> Self {
        Self {
            total: companies.len(),
            companies,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::company::Company;
use crate::models::criteria::SearchCriteria;

/// 命中字段标签
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MatchedField {
    Products,
    Location,
    Name,
}

impl MatchedField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchedField::Products => "products",
            MatchedField::Location => "location",
            MatchedField::Name => "name",
        }
    }
}

/// 带评分的公司
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCompany {
    pub company: Company,
    pub score: u32,
    pub matched_fields: BTreeSet<MatchedField>,
    pub explanation: String,
}

/// 结果来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// 来自公司数据存储
    Store,
    /// 存储不可用时的内置演示数据
    Fallback,
}

/// 搜索响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// 原始查询
    pub query: String,
    /// 结果数量
    pub total_results: usize,
    /// 排序后的结果
    pub companies: Vec<ScoredCompany>,
    /// 耗时（毫秒）
    pub elapsed_ms: u64,
    /// 使用的搜索条件
    pub criteria: SearchCriteria,
    /// 是否请求了语言模型辅助
    pub used_assist: bool,
    /// 结果来源
    pub source: ResultSource,
}

/// 存储连通性检测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<Company>>,
}

/// 数据统计
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Statistics {
    pub total_companies: u64,
    pub provinces: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

//! Supabase 存储层
//!
//! 通过 PostgREST HTTP API 只读访问公司表。

use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::config::StoreConfig;
use crate::models::company::{Company, columns};
use crate::models::query::RemoteQuery;
use crate::storage::DataAccessError;
use crate::storage::repository::CompanyStore;

/// PostgREST 连接配置
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl From<StoreConfig> for SupabaseConfig {
    fn from(config: StoreConfig) -> Self {
        let table = if config.table.is_empty() {
            "companies".to_string()
        } else {
            config.table
        };
        Self {
            url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            table,
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }
}

/// Supabase 公司表客户端
#[derive(Clone)]
pub struct SupabaseStore {
    /// 配置
    config: SupabaseConfig,
    /// HTTP 客户端
    http_client: Arc<reqwest::Client>,
}

impl SupabaseStore {
    /// 创建新的存储客户端
    ///
    /// 不在此处探测连通性，探测由搜索服务负责。
    pub fn new(config: &StoreConfig) -> Result<Self, DataAccessError> {
        let config = SupabaseConfig::from(config.clone());
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(auth_headers(&config.api_key)?)
            .build()?;

        Ok(Self {
            config,
            http_client: Arc::new(http_client),
        })
    }

    /// 表的 REST 地址
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    /// 执行 GET 查询并反序列化为行
    async fn select<T>(&self, params: &[(String, String)]) -> Result<Vec<T>, DataAccessError>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!("PostgREST select on {}: {:?}", self.config.table, params);

        let response = self
            .http_client
            .get(self.table_url())
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DataAccessError::Status { status, body });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| DataAccessError::Decode(e.to_string()))
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap, DataAccessError> {
    let mut headers = HeaderMap::new();
    if api_key.is_empty() {
        return Ok(headers);
    }

    let invalid = |e: reqwest::header::InvalidHeaderValue| {
        DataAccessError::Unavailable(format!("API 密钥无效: {}", e))
    };
    headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid)?);
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(invalid)?,
    );
    Ok(headers)
}

/// 读取去重列值时的分页大小
const DISTINCT_PAGE_SIZE: usize = 1000;

/// 解析 `Content-Range: 0-0/123` 或 `*/123` 中的总数
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl CompanyStore for SupabaseStore {
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<Company>, DataAccessError> {
        self.select(&query.to_postgrest_params()).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Company>, DataAccessError> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            (columns::ID.to_string(), format!("eq.{}", id)),
            ("limit".to_string(), "1".to_string()),
        ];
        let rows: Vec<Company> = self.select(&params).await?;
        Ok(rows.into_iter().next())
    }

    async fn count(&self) -> Result<u64, DataAccessError> {
        let response = self
            .http_client
            .head(self.table_url())
            .query(&[("select", columns::ID)])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataAccessError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            });
        }

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| DataAccessError::Decode("缺少 Content-Range 计数".to_string()))
    }

    async fn distinct_values(
        &self,
        column: &'static str,
    ) -> Result<BTreeSet<String>, DataAccessError> {
        let mut values = BTreeSet::new();
        let mut offset = 0usize;

        // 服务端 max-rows 可能小于请求页大小，按实际返回行数推进，直到空页
        loop {
            let params = vec![
                ("select".to_string(), column.to_string()),
                (column.to_string(), "not.is.null".to_string()),
                ("order".to_string(), format!("{}.asc", columns::ID)),
                ("limit".to_string(), DISTINCT_PAGE_SIZE.to_string()),
                ("offset".to_string(), offset.to_string()),
            ];
            let rows: Vec<serde_json::Map<String, serde_json::Value>> =
                self.select(&params).await?;
            if rows.is_empty() {
                break;
            }
            offset += rows.len();

            values.extend(
                rows.iter()
                    .filter_map(|row| row.get(column).and_then(|v| v.as_str()))
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty()),
            );
        }

        debug!("Collected {} distinct {} values from {} rows", values.len(), column, offset);
        Ok(values)
    }
}

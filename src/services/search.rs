//! 搜索编排服务
//!
//! 探测 → 提取条件 → 查询存储 → 评分排序 → 截断 → 响应。
//! 探测或查询失败时转入演示数据分支，`search` 永不返回错误。

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::models::company::{Company, columns};
use crate::models::criteria::SearchCriteria;
use crate::models::query::{Predicate, RemoteQuery};
use crate::models::search::{
    ConnectionStatus, ResultSource, ScoredCompany, SearchResponse, Statistics,
};
use crate::observability::AppMetrics;
use crate::services::extraction::CriteriaExtractor;
use crate::services::{fallback, query_builder, scoring};
use crate::storage::{CompanyStore, DataAccessError};

/// 按名称搜索的最大返回数
pub const NAME_SEARCH_LIMIT: usize = 5;
/// 连通性检测返回的样例行数
pub const CONNECTION_SAMPLE_SIZE: usize = 3;

#[async_trait]
pub trait SearchService: Send + Sync {
    /// 自然语言搜索
    async fn search(&self, query: &str, limit: usize, use_assist: bool) -> SearchResponse;
    /// 按中英文名称子串搜索，最多 5 条
    async fn search_by_name(&self, name: &str) -> Vec<Company>;
    /// 根据 ID 获取公司，出错时视为不存在
    async fn get_by_id(&self, id: i64) -> Option<Company>;
    /// 检测存储连通性
    async fn test_connection(&self) -> ConnectionStatus;
    /// 获取统计信息，出错时返回空统计
    async fn get_statistics(&self) -> Statistics;
}

/// 单次搜索的终态
enum SearchOutcome {
    Ranked {
        criteria: SearchCriteria,
        companies: Vec<ScoredCompany>,
    },
    Fallback(DataAccessError),
}

pub struct SearchServiceImpl {
    store: Arc<dyn CompanyStore>,
    extractor: CriteriaExtractor,
    metrics: Arc<AppMetrics>,
    default_limit: usize,
    max_limit: usize,
}

impl SearchServiceImpl {
    pub fn new(store: Arc<dyn CompanyStore>, extractor: CriteriaExtractor) -> Self {
        Self {
            store,
            extractor,
            metrics: Arc::new(AppMetrics::default()),
            default_limit: 10,
            max_limit: 50,
        }
    }

    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit.max(1);
        self.max_limit = max_limit.max(self.default_limit);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    fn normalize_limit(&self, limit: usize) -> usize {
        if limit == 0 {
            self.default_limit
        } else {
            limit.min(self.max_limit)
        }
    }

    /// 存储可达且非空
    async fn probe(&self, sample: usize) -> Result<Vec<Company>, DataAccessError> {
        let rows = self.store.sample(sample).await?;
        if rows.is_empty() {
            return Err(DataAccessError::Unavailable("公司表为空".to_string()));
        }
        Ok(rows)
    }

    async fn run(&self, query: &str, limit: usize, use_assist: bool) -> SearchOutcome {
        if let Err(e) = self.probe(1).await {
            return SearchOutcome::Fallback(e);
        }

        let criteria = self.extractor.extract(query, use_assist).await;
        debug!("Extracted criteria for '{}': {:?}", query, criteria);

        let remote = query_builder::build(&criteria, limit);
        let rows = match self.store.fetch(&remote).await {
            Ok(rows) => rows,
            Err(e) => return SearchOutcome::Fallback(e),
        };
        debug!("Store returned {} candidate rows", rows.len());

        let mut companies: Vec<ScoredCompany> = rows
            .iter()
            .map(|company| scoring::score(company, &criteria, query))
            .collect();
        // sort_by 是稳定排序，同分保持存储返回顺序
        companies.sort_by(|a, b| b.score.cmp(&a.score));
        companies.truncate(limit);

        SearchOutcome::Ranked {
            criteria,
            companies,
        }
    }
}

#[async_trait]
impl SearchService for SearchServiceImpl {
    async fn search(&self, query: &str, limit: usize, use_assist: bool) -> SearchResponse {
        let started = Instant::now();
        let limit = self.normalize_limit(limit);

        let (criteria, companies, source) = match self.run(query, limit, use_assist).await {
            SearchOutcome::Ranked {
                criteria,
                companies,
            } => (criteria, companies, ResultSource::Store),
            SearchOutcome::Fallback(e) => {
                warn!("Company store unavailable, serving demo data: {}", e);
                self.metrics.record_fallback();
                (
                    SearchCriteria::default(),
                    fallback::demo_results(query, limit),
                    ResultSource::Fallback,
                )
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.metrics.record_search(elapsed_ms);
        info!(
            "Search '{}' returned {} results from {:?} in {}ms",
            query,
            companies.len(),
            source,
            elapsed_ms
        );

        SearchResponse {
            query: query.to_string(),
            total_results: companies.len(),
            companies,
            elapsed_ms,
            criteria,
            used_assist: use_assist,
            source,
        }
    }

    async fn search_by_name(&self, name: &str) -> Vec<Company> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }

        let query = RemoteQuery::new(NAME_SEARCH_LIMIT).filter(Predicate::AnyContains {
            columns: query_builder::NAME_COLUMNS.to_vec(),
            needles: vec![name.to_string()],
        });

        match self.store.fetch(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Name search for '{}' failed: {}", name, e);
                self.metrics.record_error();
                Vec::new()
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> Option<Company> {
        match self.store.get_by_id(id).await {
            Ok(company) => company,
            Err(e) => {
                warn!("Lookup of company {} failed: {}", id, e);
                self.metrics.record_error();
                None
            }
        }
    }

    async fn test_connection(&self) -> ConnectionStatus {
        match self.probe(CONNECTION_SAMPLE_SIZE).await {
            Ok(rows) => ConnectionStatus {
                ok: true,
                message: format!("Connected, {} sample rows", rows.len()),
                sample: Some(rows),
            },
            Err(e) => ConnectionStatus {
                ok: false,
                message: e.to_string(),
                sample: None,
            },
        }
    }

    async fn get_statistics(&self) -> Statistics {
        let (total, provinces, categories) = tokio::join!(
            self.store.count(),
            self.store.distinct_values(columns::PROVINCE),
            self.store.distinct_values(columns::CATEGORY),
        );

        match (total, provinces, categories) {
            (Ok(total_companies), Ok(provinces), Ok(categories)) => Statistics {
                total_companies,
                provinces,
                categories,
            },
            (total, provinces, categories) => {
                let error = total
                    .err()
                    .or(provinces.err())
                    .or(categories.err())
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                warn!("Statistics unavailable: {}", error);
                self.metrics.record_error();
                Statistics::default()
            }
        }
    }
}

pub fn create_search_service(
    store: Arc<dyn CompanyStore>,
    extractor: CriteriaExtractor,
    metrics: Arc<AppMetrics>,
) -> Box<dyn SearchService> {
    Box::new(SearchServiceImpl::new(store, extractor).with_metrics(metrics))
}

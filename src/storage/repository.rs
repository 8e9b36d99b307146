use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::models::company::Company;
use crate::models::query::RemoteQuery;
use crate::storage::DataAccessError;

/// 公司数据仓储 trait
///
/// 只读接口，不提供任何写操作。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// 按过滤条件查询，最多返回 `query.limit` 行
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<Company>, DataAccessError>;

    /// 根据 ID 获取公司
    async fn get_by_id(&self, id: i64) -> Result<Option<Company>, DataAccessError>;

    /// 统计公司总数
    async fn count(&self) -> Result<u64, DataAccessError>;

    /// 获取某列的去重非空取值
    async fn distinct_values(
        &self,
        column: &'static str,
    ) -> Result<BTreeSet<String>, DataAccessError>;

    /// 不带过滤条件取前 `limit` 行
    async fn sample(&self, limit: usize) -> Result<Vec<Company>, DataAccessError> {
        self.fetch(&RemoteQuery::new(limit)).await
    }
}

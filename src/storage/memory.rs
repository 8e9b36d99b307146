//! 内存公司存储
//!
//! 按插入顺序保存记录，直接在内存中对 `RemoteQuery` 求值。

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::models::company::Company;
use crate::models::query::RemoteQuery;
use crate::storage::DataAccessError;
use crate::storage::repository::CompanyStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryCompanyStore {
    companies: Vec<Company>,
}

impl MemoryCompanyStore {
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<Company>, DataAccessError> {
        Ok(self
            .companies
            .iter()
            .filter(|company| query.matches(company))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Company>, DataAccessError> {
        Ok(self.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, DataAccessError> {
        Ok(self.companies.len() as u64)
    }

    async fn distinct_values(
        &self,
        column: &'static str,
    ) -> Result<BTreeSet<String>, DataAccessError> {
        Ok(self
            .companies
            .iter()
            .filter_map(|c| c.text(column))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect())
    }
}

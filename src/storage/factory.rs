//! 存储工厂模块
//!
//! 根据配置创建相应的公司存储实例。

use std::sync::Arc;

use crate::config::config::StoreConfig;
use crate::error::{AppError, Result};
use crate::services::fallback::demo_companies;
use crate::storage::memory::MemoryCompanyStore;
use crate::storage::repository::CompanyStore;
use crate::storage::supabase::SupabaseStore;

/// 根据配置创建存储实例
///
/// `memory` 后端以内置演示数据初始化，便于离线运行。
pub fn create_company_store(config: &StoreConfig) -> Result<Arc<dyn CompanyStore>> {
    match config.backend.as_str() {
        "supabase" | "" => Ok(Arc::new(SupabaseStore::new(config)?)),
        "memory" => Ok(Arc::new(MemoryCompanyStore::new(demo_companies()))),
        other => Err(AppError::Config(format!("未知的存储后端: {}", other))),
    }
}

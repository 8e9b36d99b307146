//! 存储层模块
//!
//! 公司数据只读访问：PostgREST（Supabase）远程表与内存实现。

pub mod factory;
pub mod memory;
pub mod repository;
pub mod supabase;

pub use factory::create_company_store;
pub use memory::MemoryCompanyStore;
pub use repository::CompanyStore;
pub use supabase::SupabaseStore;

use thiserror::Error;

/// 数据访问错误
///
/// 存储不可达、请求被拒绝或返回错误负载都归为此类。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataAccessError {
    /// 网络传输失败
    #[error("请求数据存储失败: {0}")]
    Transport(String),

    /// 非成功状态码
    #[error("数据存储返回错误 {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应无法解析
    #[error("解析存储响应失败: {0}")]
    Decode(String),

    /// 存储不可用
    #[error("数据存储不可用: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for DataAccessError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DataAccessError::Decode(e.to_string())
        } else {
            DataAccessError::Transport(e.to_string())
        }
    }
}

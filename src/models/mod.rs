//! 核心数据模型模块
//!
//! 定义公司记录、搜索条件、远程查询与搜索结果等核心数据结构。

pub mod company;
pub mod criteria;
pub mod query;
pub mod search;

pub use company::*;
pub use criteria::*;
pub use query::*;
pub use search::*;

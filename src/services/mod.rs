//! 服务模块

pub mod assist;
pub mod extraction;
pub mod fallback;
pub mod query_builder;
pub mod scoring;
pub mod search;

pub use assist::{AssistError, CriteriaAssist, OpenAiAssist, create_criteria_assist};
pub use extraction::{CriteriaExtractor, extract_basic};
pub use search::{SearchService, SearchServiceImpl, create_search_service};

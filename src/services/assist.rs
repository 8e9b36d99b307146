//! 语言模型辅助服务
//!
//! 调用 OpenAI 兼容的 chat completions 接口，将查询解析为部分搜索条件。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::config::AssistConfig;
use crate::models::criteria::SearchCriteria;

/// 语言模型辅助错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssistError {
    #[error("请求语言模型失败: {0}")]
    Transport(String),

    #[error("语言模型返回错误 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("语言模型未返回内容")]
    EmptyCompletion,

    #[error("解析语言模型输出失败: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AssistError {
    fn from(e: reqwest::Error) -> Self {
        AssistError::Transport(e.to_string())
    }
}

/// 条件辅助 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CriteriaAssist: Send + Sync {
    /// 返回语言模型建议的部分条件
    async fn suggest(&self, query: &str) -> Result<SearchCriteria, AssistError>;
}

const PROMPT_TEMPLATE: &str = r#"You extract search filters for a database of Chinese manufacturing companies.
Read the user query and answer ONLY with a JSON object of this exact shape:
{
  "products": ["lowercase product keywords"],
  "location": ["Chinese province names in English, e.g. Guangdong"],
  "industry": ["lowercase industry keywords"],
  "employeeRange": {"operator": "at_least" | "at_most" | "less_than", "count": 0} or null,
  "creditRating": "good" | "medium" | "low" or null,
  "foundedAfter": 4-digit year or null,
  "hasWebsite": true or null,
  "companyName": "name fragment" or null
}
Use empty lists and nulls for anything the query does not mention.

Query: "#;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI 兼容接口客户端
pub struct OpenAiAssist {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiAssist {
    pub fn new(config: &AssistConfig) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// 根据 base URL 推导 chat completions 地址
    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/chat/completions", base)
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status { status, body });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistError::EmptyCompletion)
    }
}

#[async_trait]
impl CriteriaAssist for OpenAiAssist {
    async fn suggest(&self, query: &str) -> Result<SearchCriteria, AssistError> {
        let prompt = format!("{}{}", PROMPT_TEMPLATE, query);
        let content = self.complete(&prompt).await?;
        debug!("Assist completion: {}", content);
        parse_completion(&content)
    }
}

/// 去除 markdown 代码块标记
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// 解析模型输出为部分条件并规范化标签
pub fn parse_completion(content: &str) -> Result<SearchCriteria, AssistError> {
    let mut criteria: SearchCriteria = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| AssistError::Parse(e.to_string()))?;

    criteria.products = normalize(criteria.products, true);
    criteria.industry = normalize(criteria.industry, true);
    criteria.location = normalize(criteria.location, false);
    criteria.company_name = criteria
        .company_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    Ok(criteria)
}

fn normalize(tags: BTreeSet<String>, lowercase: bool) -> BTreeSet<String> {
    tags.into_iter()
        .map(|tag| {
            let tag = tag.trim();
            if lowercase {
                tag.to_lowercase()
            } else {
                tag.to_string()
            }
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// 根据配置创建辅助客户端，未启用时返回 None
pub fn create_criteria_assist(
    config: &AssistConfig,
) -> Result<Option<Arc<dyn CriteriaAssist>>, AssistError> {
    if !config.enabled {
        return Ok(None);
    }
    let assist: Arc<dyn CriteriaAssist> = Arc::new(OpenAiAssist::new(config)?);
    Ok(Some(assist))
}

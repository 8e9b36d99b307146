use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 公司数据存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// 存储后端: "supabase" 或 "memory"
    pub backend: String,
    /// PostgREST 服务地址（不含 /rest/v1）
    pub url: String,
    /// API 密钥
    pub api_key: String,
    /// 公司表名
    pub table: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 语言模型辅助配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssistConfig {
    /// 是否启用
    pub enabled: bool,
    /// OpenAI 兼容接口地址
    pub base_url: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// 最大输出 token 数
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
    /// 触发辅助的最短查询长度（字符）
    pub min_query_chars: usize,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// 默认返回数量
    pub default_limit: usize,
    /// 最大返回数量
    pub max_limit: usize,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 存储配置
    pub store: StoreConfig,
    /// 语言模型辅助配置
    pub assist: AssistConfig,
    /// 搜索配置
    pub search: SearchConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            store: StoreConfig {
                backend: "supabase".into(),
                url: "http://localhost:54321".into(),
                api_key: String::new(),
                table: "companies".into(),
                timeout_secs: 15,
            },
            assist: AssistConfig {
                enabled: false,
                base_url: "https://api.openai.com/v1".into(),
                api_key: None,
                model: "gpt-3.5-turbo".into(),
                max_tokens: 500,
                temperature: 0.1,
                min_query_chars: 10,
                timeout_secs: 30,
            },
            search: SearchConfig {
                default_limit: 10,
                max_limit: 50,
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "manufind".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config
    }
}

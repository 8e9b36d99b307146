use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 环境预设默认值（开发或生产）
    /// 2. ./config.toml
    /// 3. MANUFIND_ 前缀的环境变量（`__` 分隔层级，如 MANUFIND_STORE__URL）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::defaults()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MANUFIND_").split("__"))
    }

    /// MANUFIND_ENVIRONMENT=production 时以生产环境预设为基础
    fn defaults() -> AppConfig {
        match std::env::var("MANUFIND_ENVIRONMENT").as_deref() {
            Ok("production") => AppConfig::production(),
            _ => AppConfig::development(),
        }
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        match config.store.backend.as_str() {
            "memory" => {}
            "supabase" => {
                if config.store.url.is_empty() {
                    return Err(ConfigValidationError::MissingStoreUrl);
                }
                if config.store.table.is_empty() {
                    return Err(ConfigValidationError::MissingTable);
                }
            }
            other => return Err(ConfigValidationError::UnknownBackend(other.to_string())),
        }

        if config.search.default_limit == 0
            || config.search.default_limit > config.search.max_limit
        {
            return Err(ConfigValidationError::InvalidLimit);
        }

        if config.assist.enabled && config.assist.model.is_empty() {
            return Err(ConfigValidationError::MissingAssistModel);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("存储服务 URL 未配置")]
    MissingStoreUrl,

    #[error("公司表名未配置")]
    MissingTable,

    #[error("未知的存储后端: {0}")]
    UnknownBackend(String),

    #[error("默认返回数量必须在 1 和最大返回数量之间")]
    InvalidLimit,

    #[error("启用语言模型辅助时必须配置模型名称")]
    MissingAssistModel,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_valid() {
        let config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_backend() {
        let mut config = AppConfig::development();
        config.store.backend = "mysql".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = AppConfig::development();
        config.search.default_limit = 100;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidLimit)
        ));
    }

    #[test]
    fn test_load_merges_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "manufind.toml",
                r#"
                [store]
                table = "manufacturers"

                [search]
                default_limit = 5
                "#,
            )?;
            jail.set_env("MANUFIND_STORE__URL", "http://db.internal:3000");

            let config = ConfigLoader::load_from("manufind.toml")?;
            assert_eq!(config.store.table, "manufacturers");
            assert_eq!(config.store.url, "http://db.internal:3000");
            assert_eq!(config.search.default_limit, 5);
            assert_eq!(config.search.max_limit, 50);
            Ok(())
        });
    }

    #[test]
    fn test_production_environment_uses_production_preset() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MANUFIND_ENVIRONMENT", "production");

            let config = ConfigLoader::load_from("missing.toml")?;
            assert_eq!(config.environment, "production");
            assert_eq!(config.logging.level, "info");
            assert!(config.logging.structured);
            assert_eq!(config.logging.log_dir, Some(PathBuf::from("./logs")));
            Ok(())
        });
    }
}

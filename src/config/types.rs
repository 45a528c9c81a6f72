//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语音后端配置
    #[serde(default)]
    pub backend: BackendConfig,

    /// 要加载的实体
    #[serde(default)]
    pub entity: EntityConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 语音后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 后端基础 URL
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8181".to_string()
}

fn default_backend_timeout() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

/// 实体配置
#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    #[serde(default = "default_entity_type")]
    pub entity_type: String,

    #[serde(default)]
    pub entity_id: String,

    #[serde(default)]
    pub entity_version: u64,

    #[serde(default = "default_language_code")]
    pub language_code: String,
}

fn default_entity_type() -> String {
    "exploration".to_string()
}

fn default_language_code() -> String {
    "en".to_string()
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            entity_type: default_entity_type(),
            entity_id: String::new(),
            entity_version: 0,
            language_code: default_language_code(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

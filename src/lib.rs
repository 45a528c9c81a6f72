//! Voiceover Cache - 实体语音缓存与语言口音解析
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voiceover Context: 语音、音频偏移、实体语音聚合
//! - Language Context: 语言口音主列表与自动生成能力
//!
//! 应用层 (application/):
//! - Ports: VoiceoverBackendPort
//! - Error: ApplicationError
//!
//! 基础设施层 (infrastructure/):
//! - Memory: EntityVoiceoversCache, VoiceoverLanguageManagementService
//! - Events: 加载完成信号
//! - Adapters: HTTP / Fake 语音后端
//! - Context: 会话级上下文

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use infrastructure::VoiceoverContext;

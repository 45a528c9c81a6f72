//! Voiceover Backend Port - 语音后端访问抽象
//!
//! 定义获取实体语音与语言管理数据的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::language::VoiceoverAdminData;
use crate::domain::voiceover::EntityVoiceovers;

/// 后端访问错误
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// 实体语音的查询键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityVoiceoversQuery {
    pub entity_type: String,
    pub entity_id: String,
    pub entity_version: u64,
    pub language_code: String,
}

/// Voiceover Backend Port
///
/// 超时和重试由具体实现负责，调用方不做重试
#[async_trait]
pub trait VoiceoverBackendPort: Send + Sync {
    /// 获取实体在某个语言下所有口音的语音
    ///
    /// 每个口音对应一个 EntityVoiceovers
    async fn fetch_entity_voiceovers_by_language_code(
        &self,
        query: &EntityVoiceoversQuery,
    ) -> Result<Vec<EntityVoiceovers>, BackendError>;

    /// 获取语言口音主列表及自动生成能力
    async fn fetch_voiceover_admin_data(&self) -> Result<VoiceoverAdminData, BackendError>;
}

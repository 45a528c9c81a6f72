//! 应用层错误定义
//!
//! 缓存与语言管理操作的统一错误类型

use thiserror::Error;

use crate::application::ports::BackendError;
use crate::domain::language::LanguageError;
use crate::domain::voiceover::VoiceoverError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 后端访问失败
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// 语音数据违反约束
    #[error("Voiceover error: {0}")]
    Voiceover(#[from] VoiceoverError),

    /// 语言能力查询失败
    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ApplicationError {
    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

//! Language Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("语言代码不存在: {0}")]
    LanguageCodeNotFound(String),
}

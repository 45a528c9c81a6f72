//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceoverBackendPort）
//! - error: 应用层错误定义

pub mod error;
pub mod ports;

pub use error::ApplicationError;

pub use ports::{BackendError, EntityVoiceoversQuery, VoiceoverBackendPort};

//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voiceover Context: 实体语音
//! - Language Context: 语音语言 / 口音能力

pub mod language;
pub mod voiceover;

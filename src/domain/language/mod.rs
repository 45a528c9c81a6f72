//! Language Context - 语音语言限界上下文
//!
//! 职责:
//! - 语言 / 口音主列表
//! - 可自动生成语音的口音判定

mod capability;
mod errors;

pub use capability::{
    LanguageAccentMasterList, LanguageCapabilities, LanguageCodesMapping, VoiceoverAdminData,
};
pub use errors::LanguageError;

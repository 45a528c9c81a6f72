//! Voiceover Context - 实体语音限界上下文
//!
//! 职责:
//! - 单个语音资源 (Voiceover) 与音频偏移 (AudioOffset)
//! - 实体在某个语言口音下的语音聚合 (EntityVoiceovers)
//! - 传输层记录与领域对象之间的转换

mod aggregate;
mod errors;
mod records;
mod value_objects;

pub use aggregate::EntityVoiceovers;
pub use errors::VoiceoverError;
pub use records::{
    AudioOffsetRecord, EntityVoiceoversRecord, VoiceoverRecord, VoiceoverTypeRecord,
};
pub use value_objects::{AudioOffset, ContentVoiceovers, Voiceover};

//! Voiceover Context - 传输层记录
//!
//! 与后端 JSON 结构一一对应，未知字段在反序列化时直接拒绝

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个语音资源的传输记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceoverRecord {
    pub filename: String,
    pub file_size_bytes: u64,
    pub needs_update: bool,
    pub duration_secs: f64,
}

/// 单个内容项的 manual / auto 语音记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceoverTypeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<VoiceoverRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<VoiceoverRecord>,
}

/// 单个 token 的音频偏移记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioOffsetRecord {
    pub token: String,
    pub audio_offset_msecs: f64,
}

/// 实体在某个语言口音下的全部语音记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityVoiceoversRecord {
    pub entity_id: String,
    pub entity_type: String,
    pub entity_version: u64,
    pub language_accent_code: String,
    /// content_id -> {manual?, auto?}
    #[serde(default)]
    pub voiceovers_mapping: IndexMap<String, VoiceoverTypeRecord>,
    /// content_id -> [{token, audio_offset_msecs}]
    #[serde(default)]
    pub automated_voiceovers_audio_offsets_msecs: IndexMap<String, Vec<AudioOffsetRecord>>,
}

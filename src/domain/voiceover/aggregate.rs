//! Voiceover Context - Aggregate Root

use indexmap::IndexMap;

use super::records::{
    AudioOffsetRecord, EntityVoiceoversRecord, VoiceoverRecord, VoiceoverTypeRecord,
};
use super::{AudioOffset, ContentVoiceovers, Voiceover, VoiceoverError};

/// 实体在单个语言口音下的语音聚合
///
/// 不变量:
/// - (entity_id, entity_type, entity_version, language_accent_code) 标识唯一实例
/// - 构造后不再修改，缓存只整体替换实例
/// - 偏移序列保持后端给出的顺序（与自动语音中的 token 顺序一致）
#[derive(Debug, Clone, PartialEq)]
pub struct EntityVoiceovers {
    entity_id: String,
    entity_type: String,
    entity_version: u64,
    language_accent_code: String,
    voiceovers_mapping: IndexMap<String, ContentVoiceovers>,
    automated_voiceovers_audio_offsets_msecs: IndexMap<String, Vec<AudioOffset>>,
}

impl EntityVoiceovers {
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        entity_version: u64,
        language_accent_code: impl Into<String>,
        voiceovers_mapping: IndexMap<String, ContentVoiceovers>,
        automated_voiceovers_audio_offsets_msecs: IndexMap<String, Vec<AudioOffset>>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            entity_version,
            language_accent_code: language_accent_code.into(),
            voiceovers_mapping,
            automated_voiceovers_audio_offsets_msecs,
        }
    }

    /// 从传输层记录构造
    ///
    /// 只有记录中存在的 manual / auto 字段才会生成对应语音，缺失即视为"无此类型语音"
    pub fn from_record(record: EntityVoiceoversRecord) -> Result<Self, VoiceoverError> {
        let mut voiceovers_mapping = IndexMap::with_capacity(record.voiceovers_mapping.len());
        for (content_id, type_record) in record.voiceovers_mapping {
            let manual = type_record.manual.map(voiceover_from_record).transpose()?;
            let auto = type_record.auto.map(voiceover_from_record).transpose()?;
            voiceovers_mapping.insert(content_id, ContentVoiceovers::new(manual, auto));
        }

        let mut offsets_mapping =
            IndexMap::with_capacity(record.automated_voiceovers_audio_offsets_msecs.len());
        for (content_id, offsets) in record.automated_voiceovers_audio_offsets_msecs {
            let offsets = offsets
                .into_iter()
                .map(|o| AudioOffset::new(o.token, o.audio_offset_msecs))
                .collect::<Result<Vec<_>, _>>()?;
            offsets_mapping.insert(content_id, offsets);
        }

        Ok(Self {
            entity_id: record.entity_id,
            entity_type: record.entity_type,
            entity_version: record.entity_version,
            language_accent_code: record.language_accent_code,
            voiceovers_mapping,
            automated_voiceovers_audio_offsets_msecs: offsets_mapping,
        })
    }

    /// 从 JSON 字符串构造，缺失必需字段时返回 MalformedRecord
    pub fn from_json(json: &str) -> Result<Self, VoiceoverError> {
        let record: EntityVoiceoversRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    /// 转换回传输层记录
    pub fn to_record(&self) -> EntityVoiceoversRecord {
        EntityVoiceoversRecord {
            entity_id: self.entity_id.clone(),
            entity_type: self.entity_type.clone(),
            entity_version: self.entity_version,
            language_accent_code: self.language_accent_code.clone(),
            voiceovers_mapping: self
                .voiceovers_mapping
                .iter()
                .map(|(content_id, pair)| {
                    (
                        content_id.clone(),
                        VoiceoverTypeRecord {
                            manual: pair.manual.as_ref().map(voiceover_to_record),
                            auto: pair.auto.as_ref().map(voiceover_to_record),
                        },
                    )
                })
                .collect(),
            automated_voiceovers_audio_offsets_msecs: self
                .automated_voiceovers_audio_offsets_msecs
                .iter()
                .map(|(content_id, offsets)| {
                    let offsets = offsets
                        .iter()
                        .map(|o| AudioOffsetRecord {
                            token: o.token().to_string(),
                            audio_offset_msecs: o.audio_offset_msecs(),
                        })
                        .collect();
                    (content_id.clone(), offsets)
                })
                .collect(),
        }
    }

    pub fn manual_voiceover(&self, content_id: &str) -> Option<&Voiceover> {
        self.voiceovers_mapping
            .get(content_id)
            .and_then(|pair| pair.manual.as_ref())
    }

    pub fn automatic_voiceover(&self, content_id: &str) -> Option<&Voiceover> {
        self.voiceovers_mapping
            .get(content_id)
            .and_then(|pair| pair.auto.as_ref())
    }

    pub fn audio_offsets(&self, content_id: &str) -> Option<&[AudioOffset]> {
        self.automated_voiceovers_audio_offsets_msecs
            .get(content_id)
            .map(Vec::as_slice)
    }

    /// 有偏移时间轴但没有自动语音的内容 ID
    pub fn orphaned_offset_content_ids(&self) -> Vec<&str> {
        self.automated_voiceovers_audio_offsets_msecs
            .keys()
            .filter(|content_id| self.automatic_voiceover(content_id).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn content_ids(&self) -> impl Iterator<Item = &str> {
        self.voiceovers_mapping.keys().map(String::as_str)
    }

    // Getters
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_version(&self) -> u64 {
        self.entity_version
    }

    pub fn language_accent_code(&self) -> &str {
        &self.language_accent_code
    }

    pub fn voiceovers_mapping(&self) -> &IndexMap<String, ContentVoiceovers> {
        &self.voiceovers_mapping
    }

    pub fn automated_voiceovers_audio_offsets_msecs(&self) -> &IndexMap<String, Vec<AudioOffset>> {
        &self.automated_voiceovers_audio_offsets_msecs
    }
}

fn voiceover_from_record(record: VoiceoverRecord) -> Result<Voiceover, VoiceoverError> {
    Voiceover::new(
        record.filename,
        record.file_size_bytes,
        record.needs_update,
        record.duration_secs,
    )
}

fn voiceover_to_record(voiceover: &Voiceover) -> VoiceoverRecord {
    VoiceoverRecord {
        filename: voiceover.filename().to_string(),
        file_size_bytes: voiceover.file_size_bytes(),
        needs_update: voiceover.needs_update(),
        duration_secs: voiceover.duration_secs(),
    }
}

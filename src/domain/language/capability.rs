//! Language Context - 语言口音能力

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::LanguageError;

/// language_code -> accent_code -> 显示名称
pub type LanguageAccentMasterList = IndexMap<String, IndexMap<String, String>>;

/// language_code -> accent_code -> 是否启用
pub type LanguageCodesMapping = IndexMap<String, IndexMap<String, bool>>;

/// 语音管理后台数据（传输层记录）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceoverAdminData {
    pub language_accent_master_list: LanguageAccentMasterList,
    pub language_codes_mapping: LanguageCodesMapping,
    pub autogeneratable_language_accent_list: Vec<String>,
}

/// 语言口音能力
///
/// 只读数据，整体替换而非局部修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageCapabilities {
    language_accent_master_list: LanguageAccentMasterList,
    autogeneratable_language_accent_codes: Vec<String>,
    language_codes_mapping: LanguageCodesMapping,
}

impl LanguageCapabilities {
    pub fn new(
        language_accent_master_list: LanguageAccentMasterList,
        autogeneratable_language_accent_codes: Vec<String>,
        language_codes_mapping: LanguageCodesMapping,
    ) -> Self {
        Self {
            language_accent_master_list,
            autogeneratable_language_accent_codes,
            language_codes_mapping,
        }
    }

    /// 语言下标记为 true 的口音，按映射顺序返回
    ///
    /// 语言不在映射中时返回 LanguageCodeNotFound，调用方应先检查 can_voiceover_for_language
    pub fn enabled_language_accents(&self, language_code: &str) -> Result<Vec<String>, LanguageError> {
        let accents = self
            .language_codes_mapping
            .get(language_code)
            .ok_or_else(|| LanguageError::LanguageCodeNotFound(language_code.to_string()))?;

        Ok(accents
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(accent, _)| accent.clone())
            .collect())
    }

    /// 映射中存在该语言即可，无论其下是否有启用的口音
    pub fn can_voiceover_for_language(&self, language_code: &str) -> bool {
        self.language_codes_mapping.contains_key(language_code)
    }

    pub fn is_autogeneratable(&self, language_accent_code: &str) -> bool {
        self.autogeneratable_language_accent_codes
            .iter()
            .any(|code| code == language_accent_code)
    }

    /// 在主列表中查找口音的显示名称
    pub fn language_accent_description(&self, language_accent_code: &str) -> Option<&str> {
        self.language_accent_master_list
            .values()
            .find_map(|accents| accents.get(language_accent_code))
            .map(String::as_str)
    }

    pub fn language_accent_master_list(&self) -> &LanguageAccentMasterList {
        &self.language_accent_master_list
    }

    pub fn autogeneratable_language_accent_codes(&self) -> &[String] {
        &self.autogeneratable_language_accent_codes
    }

    pub fn language_codes_mapping(&self) -> &LanguageCodesMapping {
        &self.language_codes_mapping
    }
}

impl From<VoiceoverAdminData> for LanguageCapabilities {
    fn from(data: VoiceoverAdminData) -> Self {
        Self::new(
            data.language_accent_master_list,
            data.autogeneratable_language_accent_list,
            data.language_codes_mapping,
        )
    }
}

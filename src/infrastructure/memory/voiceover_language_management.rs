//! In-Memory Voiceover Language Management Implementation

use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::language::{
    LanguageAccentMasterList, LanguageCapabilities, LanguageCodesMapping, LanguageError,
};

#[derive(Default)]
struct LanguageState {
    capabilities: LanguageCapabilities,
    /// 最近一次 set_cloud_supported_language_accents 的结果
    cloud_supported_language_accent_codes: Vec<String>,
}

/// 语音语言管理
///
/// `is_autogeneration_supported_given_language_accent` 只依赖最近一次
/// `set_cloud_supported_language_accents` 传入的语言，调用方需按顺序调用
pub struct VoiceoverLanguageManagementService {
    state: RwLock<LanguageState>,
}

impl VoiceoverLanguageManagementService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LanguageState::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 整体替换三份输入数据
    pub fn init(
        &self,
        language_accent_master_list: LanguageAccentMasterList,
        autogeneratable_language_accent_codes: Vec<String>,
        language_codes_mapping: LanguageCodesMapping,
    ) {
        self.init_with(LanguageCapabilities::new(
            language_accent_master_list,
            autogeneratable_language_accent_codes,
            language_codes_mapping,
        ));
    }

    pub fn init_with(&self, capabilities: LanguageCapabilities) {
        tracing::debug!(
            languages = capabilities.language_codes_mapping().len(),
            autogeneratable = capabilities.autogeneratable_language_accent_codes().len(),
            "Voiceover language capabilities initialized"
        );
        self.state.write().capabilities = capabilities;
    }

    pub fn autogeneratable_language_accents(
        &self,
        language_code: &str,
    ) -> Result<Vec<String>, LanguageError> {
        self.state
            .read()
            .capabilities
            .enabled_language_accents(language_code)
    }

    pub fn can_voiceover_for_language(&self, language_code: &str) -> bool {
        self.state
            .read()
            .capabilities
            .can_voiceover_for_language(language_code)
    }

    /// 重新计算云端支持的口音
    ///
    /// 语言不存在时保留原集合并返回 LanguageCodeNotFound
    pub fn set_cloud_supported_language_accents(
        &self,
        language_code: &str,
    ) -> Result<(), LanguageError> {
        let mut state = self.state.write();
        match state.capabilities.enabled_language_accents(language_code) {
            Ok(accents) => {
                tracing::debug!(
                    language_code = %language_code,
                    accents = ?accents,
                    "Cloud supported language accents updated"
                );
                state.cloud_supported_language_accent_codes = accents;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(language_code = %language_code, "Unknown voiceover language");
                Err(e)
            }
        }
    }

    pub fn is_autogeneration_supported_given_language_accent(
        &self,
        language_accent_code: &str,
    ) -> bool {
        self.state
            .read()
            .cloud_supported_language_accent_codes
            .iter()
            .any(|code| code == language_accent_code)
    }

    pub fn cloud_supported_language_accents(&self) -> Vec<String> {
        self.state.read().cloud_supported_language_accent_codes.clone()
    }

    pub fn is_autogeneratable(&self, language_accent_code: &str) -> bool {
        self.state
            .read()
            .capabilities
            .is_autogeneratable(language_accent_code)
    }

    pub fn language_accent_description(&self, language_accent_code: &str) -> Option<String> {
        self.state
            .read()
            .capabilities
            .language_accent_description(language_accent_code)
            .map(str::to_string)
    }
}

impl Default for VoiceoverLanguageManagementService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn service() -> VoiceoverLanguageManagementService {
        let mut master_list = LanguageAccentMasterList::new();
        master_list.insert(
            "en".to_string(),
            IndexMap::from([
                ("en-US".to_string(), "English (United States)".to_string()),
                ("en-GB".to_string(), "English (United Kingdom)".to_string()),
            ]),
        );
        master_list.insert(
            "hi".to_string(),
            IndexMap::from([("hi-IN".to_string(), "Hindi (India)".to_string())]),
        );

        let mut mapping = LanguageCodesMapping::new();
        mapping.insert(
            "en".to_string(),
            IndexMap::from([("en-US".to_string(), true), ("en-GB".to_string(), false)]),
        );
        mapping.insert(
            "hi".to_string(),
            IndexMap::from([("hi-IN".to_string(), true)]),
        );

        let service = VoiceoverLanguageManagementService::new();
        service.init(
            master_list,
            vec!["en-US".to_string(), "hi-IN".to_string()],
            mapping,
        );
        service
    }

    #[test]
    fn test_autogeneratable_language_accents() {
        let service = service();
        assert_eq!(
            service.autogeneratable_language_accents("en").unwrap(),
            vec!["en-US"]
        );
        assert!(matches!(
            service.autogeneratable_language_accents("es"),
            Err(LanguageError::LanguageCodeNotFound(_))
        ));
    }

    #[test]
    fn test_can_voiceover_for_language() {
        let service = service();
        assert!(service.can_voiceover_for_language("en"));
        assert!(!service.can_voiceover_for_language("es"));
    }

    #[test]
    fn test_cloud_support_follows_last_language() {
        let service = service();
        assert!(!service.is_autogeneration_supported_given_language_accent("en-US"));

        service.set_cloud_supported_language_accents("en").unwrap();
        assert!(service.is_autogeneration_supported_given_language_accent("en-US"));
        assert!(!service.is_autogeneration_supported_given_language_accent("en-GB"));

        service.set_cloud_supported_language_accents("hi").unwrap();
        assert!(!service.is_autogeneration_supported_given_language_accent("en-US"));
        assert!(service.is_autogeneration_supported_given_language_accent("hi-IN"));
    }

    #[test]
    fn test_cloud_support_matches_autogeneratable_accents() {
        let service = service();
        for language in ["en", "hi"] {
            service.set_cloud_supported_language_accents(language).unwrap();
            assert_eq!(
                service.cloud_supported_language_accents(),
                service.autogeneratable_language_accents(language).unwrap()
            );
        }
    }

    #[test]
    fn test_unknown_language_keeps_cloud_support() {
        let service = service();
        service.set_cloud_supported_language_accents("en").unwrap();

        let result = service.set_cloud_supported_language_accents("es");
        assert!(matches!(result, Err(LanguageError::LanguageCodeNotFound(code)) if code == "es"));
        assert_eq!(service.cloud_supported_language_accents(), vec!["en-US"]);
        assert!(service.is_autogeneration_supported_given_language_accent("en-US"));
    }

    #[test]
    fn test_init_replaces_inputs() {
        let service = service();
        service.init(
            LanguageAccentMasterList::new(),
            Vec::new(),
            LanguageCodesMapping::new(),
        );
        assert!(!service.can_voiceover_for_language("en"));
        assert!(!service.is_autogeneratable("en-US"));
        assert_eq!(service.language_accent_description("en-US"), None);
    }

    #[test]
    fn test_accent_metadata() {
        let service = service();
        assert_eq!(
            service.language_accent_description("hi-IN"),
            Some("Hindi (India)".to_string())
        );
        assert!(service.is_autogeneratable("hi-IN"));
        assert!(!service.is_autogeneratable("en-GB"));
    }
}

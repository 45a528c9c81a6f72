//! Voiceover Context
//!
//! 每个会话 / 页面构造一次，以引用方式传给各个使用方

use std::sync::Arc;

use crate::application::{ApplicationError, VoiceoverBackendPort};
use crate::domain::language::LanguageCapabilities;
use crate::infrastructure::memory::{EntityVoiceoversCache, VoiceoverLanguageManagementService};

/// 语音会话上下文
///
/// 持有实体语音缓存、语言管理以及后端端口
pub struct VoiceoverContext {
    backend: Arc<dyn VoiceoverBackendPort>,
    cache: Arc<EntityVoiceoversCache>,
    language_management: Arc<VoiceoverLanguageManagementService>,
}

impl VoiceoverContext {
    pub fn new(backend: Arc<dyn VoiceoverBackendPort>) -> Self {
        Self {
            cache: EntityVoiceoversCache::new(backend.clone()).arc(),
            language_management: VoiceoverLanguageManagementService::new().arc(),
            backend,
        }
    }

    pub fn cache(&self) -> &Arc<EntityVoiceoversCache> {
        &self.cache
    }

    pub fn language_management(&self) -> &Arc<VoiceoverLanguageManagementService> {
        &self.language_management
    }

    /// 从后端获取语言管理数据并初始化语言管理
    pub async fn load_language_capabilities(&self) -> Result<(), ApplicationError> {
        let admin_data = self.backend.fetch_voiceover_admin_data().await?;
        self.language_management
            .init_with(LanguageCapabilities::from(admin_data));
        Ok(())
    }

    /// 切换到指定语言并返回可按需自动生成的口音
    ///
    /// 语言不支持语音时返回空列表，且不改动云端支持集合
    pub fn eligible_autogeneration_accents(
        &self,
        language_code: &str,
    ) -> Result<Vec<String>, ApplicationError> {
        if !self.language_management.can_voiceover_for_language(language_code) {
            return Ok(Vec::new());
        }
        self.language_management
            .set_cloud_supported_language_accents(language_code)?;
        Ok(self.language_management.cloud_supported_language_accents())
    }
}

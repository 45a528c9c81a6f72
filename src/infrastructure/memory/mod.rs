//! Memory Layer - In-Memory State Management
//!
//! 实现实体语音缓存与语音语言管理，所有状态只存在于进程内存中

mod entity_voiceovers_cache;
mod voiceover_language_management;

pub use entity_voiceovers_cache::EntityVoiceoversCache;
pub use voiceover_language_management::VoiceoverLanguageManagementService;

//! Infrastructure Layer - 基础设施层
//!
//! 提供端口的具体实现及会话上下文

pub mod adapters;
pub mod context;
pub mod events;
pub mod memory;

pub use adapters::{FakeVoiceoverBackend, HttpVoiceoverBackend, HttpVoiceoverBackendConfig};
pub use context::VoiceoverContext;
pub use events::LoadedSignal;
pub use memory::{EntityVoiceoversCache, VoiceoverLanguageManagementService};

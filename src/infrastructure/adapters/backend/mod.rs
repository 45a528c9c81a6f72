//! Backend Adapter - 语音后端客户端实现

mod fake_voiceover_backend;
mod http_voiceover_backend;

pub use fake_voiceover_backend::FakeVoiceoverBackend;
pub use http_voiceover_backend::{HttpVoiceoverBackend, HttpVoiceoverBackendConfig};

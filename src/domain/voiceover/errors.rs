//! Voiceover Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceoverError {
    #[error("无效的语音: {0}")]
    InvalidVoiceover(String),

    #[error("无效的音频偏移: {0}")]
    InvalidAudioOffset(String),

    #[error("格式错误的语音记录: {0}")]
    MalformedRecord(String),
}

impl From<serde_json::Error> for VoiceoverError {
    fn from(err: serde_json::Error) -> Self {
        VoiceoverError::MalformedRecord(err.to_string())
    }
}

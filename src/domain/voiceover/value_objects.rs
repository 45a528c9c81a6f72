//! Voiceover Context - Value Objects

use super::VoiceoverError;

/// 单个语音资源
///
/// 不变量:
/// - duration_secs 必须是有限的非负数
/// - 构造后不可变，相等性按字段比较
#[derive(Debug, Clone, PartialEq)]
pub struct Voiceover {
    filename: String,
    file_size_bytes: u64,
    needs_update: bool,
    duration_secs: f64,
}

impl Voiceover {
    pub fn new(
        filename: impl Into<String>,
        file_size_bytes: u64,
        needs_update: bool,
        duration_secs: f64,
    ) -> Result<Self, VoiceoverError> {
        let filename = filename.into();
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(VoiceoverError::InvalidVoiceover(format!(
                "{}: duration_secs 必须是非负数, 实际为 {}",
                filename, duration_secs
            )));
        }
        Ok(Self {
            filename,
            file_size_bytes,
            needs_update,
            duration_secs,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn file_size_bytes(&self) -> u64 {
        self.file_size_bytes
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

/// 自动语音中单个 token 的起始播放偏移
#[derive(Debug, Clone, PartialEq)]
pub struct AudioOffset {
    token: String,
    audio_offset_msecs: f64,
}

impl AudioOffset {
    pub fn new(token: impl Into<String>, audio_offset_msecs: f64) -> Result<Self, VoiceoverError> {
        let token = token.into();
        if !audio_offset_msecs.is_finite() || audio_offset_msecs < 0.0 {
            return Err(VoiceoverError::InvalidAudioOffset(format!(
                "token '{}': audio_offset_msecs 必须是非负数, 实际为 {}",
                token, audio_offset_msecs
            )));
        }
        Ok(Self {
            token,
            audio_offset_msecs,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn audio_offset_msecs(&self) -> f64 {
        self.audio_offset_msecs
    }
}

/// 单个内容项的手动 / 自动语音对
///
/// 两者都可能缺失
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentVoiceovers {
    pub manual: Option<Voiceover>,
    pub auto: Option<Voiceover>,
}

impl ContentVoiceovers {
    pub fn new(manual: Option<Voiceover>, auto: Option<Voiceover>) -> Self {
        Self { manual, auto }
    }

    /// 按 manual -> auto 的顺序返回已存在的语音
    pub fn iter(&self) -> impl Iterator<Item = &Voiceover> {
        self.manual.iter().chain(self.auto.iter())
    }
}

//! HTTP Voiceover Backend - 调用语音后端 HTTP 接口
//!
//! 实现 VoiceoverBackendPort trait
//!
//! 后端 API:
//! GET {base_url}/entity_voiceovers_bulk_handler/{entity_type}/{entity_id}/{entity_version}/{language_code}
//! Response: {"entity_voiceovers_list": [EntityVoiceoversRecord, ...]}
//!
//! GET {base_url}/voiceover_admin_data_handler
//! Response: VoiceoverAdminData

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{
    BackendError, EntityVoiceoversQuery, VoiceoverBackendPort,
};
use crate::domain::language::VoiceoverAdminData;
use crate::domain::voiceover::{EntityVoiceovers, EntityVoiceoversRecord};

/// 批量获取实体语音的响应体
#[derive(Debug, Deserialize)]
struct EntityVoiceoversListResponse {
    entity_voiceovers_list: Vec<EntityVoiceoversRecord>,
}

/// HTTP 语音后端配置
#[derive(Debug, Clone)]
pub struct HttpVoiceoverBackendConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpVoiceoverBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8181".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpVoiceoverBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 语音后端
///
/// 单次请求，不做重试
pub struct HttpVoiceoverBackend {
    client: Client,
    base_url: Url,
}

impl HttpVoiceoverBackend {
    pub fn new(config: HttpVoiceoverBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url));
        }

        Ok(Self { client, base_url })
    }

    pub fn with_default_config() -> Result<Self, BackendError> {
        Self::new(HttpVoiceoverBackendConfig::default())
    }

    /// 在基础 URL 后逐段追加路径，每段单独做百分号编码
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn entity_voiceovers_url(&self, query: &EntityVoiceoversQuery) -> Result<Url, BackendError> {
        let entity_version = query.entity_version.to_string();
        self.endpoint_url(&[
            "entity_voiceovers_bulk_handler",
            &query.entity_type,
            &query.entity_id,
            &entity_version,
            &query.language_code,
        ])
    }

    fn admin_data_url(&self) -> Result<Url, BackendError> {
        self.endpoint_url(&["voiceover_admin_data_handler"])
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: Url) -> Result<T, BackendError> {
        tracing::debug!(url = %url, "Sending voiceover backend request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else if e.is_connect() {
                BackendError::NetworkError(format!("Cannot connect to voiceover backend: {}", e))
            } else {
                BackendError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl VoiceoverBackendPort for HttpVoiceoverBackend {
    async fn fetch_entity_voiceovers_by_language_code(
        &self,
        query: &EntityVoiceoversQuery,
    ) -> Result<Vec<EntityVoiceovers>, BackendError> {
        let response: EntityVoiceoversListResponse =
            self.get_json(self.entity_voiceovers_url(query)?).await?;

        let entity_voiceovers_list = parse_entity_voiceovers_list(response)?;

        tracing::info!(
            entity_id = %query.entity_id,
            language_code = %query.language_code,
            accent_count = entity_voiceovers_list.len(),
            "Entity voiceovers fetched"
        );

        Ok(entity_voiceovers_list)
    }

    async fn fetch_voiceover_admin_data(&self) -> Result<VoiceoverAdminData, BackendError> {
        self.get_json(self.admin_data_url()?).await
    }
}

fn parse_entity_voiceovers_list(
    response: EntityVoiceoversListResponse,
) -> Result<Vec<EntityVoiceovers>, BackendError> {
    response
        .entity_voiceovers_list
        .into_iter()
        .map(|record| {
            EntityVoiceovers::from_record(record)
                .map_err(|e| BackendError::InvalidResponse(e.to_string()))
        })
        .collect()
}

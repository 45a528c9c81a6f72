//! Fake Voiceover Backend - 用于测试的后端
//!
//! 按顺序返回预设的响应，不发起网络请求

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::oneshot;

use crate::application::ports::{
    BackendError, EntityVoiceoversQuery, VoiceoverBackendPort,
};
use crate::domain::language::VoiceoverAdminData;
use crate::domain::voiceover::EntityVoiceovers;

struct ScriptedResponse {
    result: Result<Vec<EntityVoiceovers>, BackendError>,
    /// 设置时，响应在收到信号后才返回
    gate: Option<oneshot::Receiver<()>>,
}

/// Fake Voiceover Backend
///
/// 预设响应用完后返回空列表
#[derive(Default)]
pub struct FakeVoiceoverBackend {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    admin_data: Mutex<Option<VoiceoverAdminData>>,
    calls: Mutex<Vec<EntityVoiceoversQuery>>,
}

impl FakeVoiceoverBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个立即返回的响应
    pub fn push_response(&self, result: Result<Vec<EntityVoiceovers>, BackendError>) {
        self.responses
            .lock()
            .push_back(ScriptedResponse { result, gate: None });
    }

    /// 追加一个等待放行的响应，返回放行用的 sender
    pub fn push_gated_response(
        &self,
        result: Result<Vec<EntityVoiceovers>, BackendError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses.lock().push_back(ScriptedResponse {
            result,
            gate: Some(rx),
        });
        tx
    }

    pub fn set_admin_data(&self, data: VoiceoverAdminData) {
        *self.admin_data.lock() = Some(data);
    }

    /// 已收到的查询
    pub fn calls(&self) -> Vec<EntityVoiceoversQuery> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl VoiceoverBackendPort for FakeVoiceoverBackend {
    async fn fetch_entity_voiceovers_by_language_code(
        &self,
        query: &EntityVoiceoversQuery,
    ) -> Result<Vec<EntityVoiceovers>, BackendError> {
        self.calls.lock().push(query.clone());
        let scripted = self.responses.lock().pop_front();

        tracing::debug!(
            entity_id = %query.entity_id,
            language_code = %query.language_code,
            "FakeVoiceoverBackend: returning scripted response"
        );

        match scripted {
            Some(ScriptedResponse { result, gate }) => {
                if let Some(gate) = gate {
                    gate.await
                        .map_err(|_| BackendError::NetworkError("request abandoned".to_string()))?;
                }
                result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_voiceover_admin_data(&self) -> Result<VoiceoverAdminData, BackendError> {
        self.admin_data
            .lock()
            .clone()
            .ok_or_else(|| BackendError::ServiceError("admin data not configured".to_string()))
    }
}

//! In-Memory Entity Voiceovers Cache Implementation

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::{EntityVoiceoversQuery, VoiceoverBackendPort};
use crate::application::ApplicationError;
use crate::domain::voiceover::{EntityVoiceovers, Voiceover};
use crate::infrastructure::events::LoadedSignal;

/// 实体标识
#[derive(Debug, Clone, PartialEq, Eq)]
struct EntityRef {
    entity_id: String,
    entity_type: String,
    entity_version: u64,
}

#[derive(Default)]
struct CacheState {
    entity: Option<EntityRef>,
    language_code: Option<String>,
    active_language_accent_code: Option<String>,
    /// language_accent_code -> EntityVoiceovers（枚举顺序即插入顺序）
    entities: IndexMap<String, Arc<EntityVoiceovers>>,
    loaded: bool,
}

/// 实体语音缓存
///
/// 以语言口音代码为键缓存 EntityVoiceovers。
/// - `init` 只重置实体标识，不清空已缓存的口音；需要全新实体时调用 `clear`
/// - 两次 fetch 交错时，后完成的响应按口音覆盖先完成的
pub struct EntityVoiceoversCache {
    backend: Arc<dyn VoiceoverBackendPort>,
    state: RwLock<CacheState>,
    loaded_signal: LoadedSignal,
}

impl EntityVoiceoversCache {
    pub fn new(backend: Arc<dyn VoiceoverBackendPort>) -> Self {
        Self {
            backend,
            state: RwLock::new(CacheState::default()),
            loaded_signal: LoadedSignal::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 设置实体标识与语言
    pub fn init(
        &self,
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        entity_version: u64,
        language_code: impl Into<String>,
    ) {
        let entity = EntityRef {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            entity_version,
        };
        let language_code = language_code.into();
        tracing::debug!(
            entity_id = %entity.entity_id,
            entity_type = %entity.entity_type,
            entity_version = entity.entity_version,
            language_code = %language_code,
            "Entity voiceovers cache initialized"
        );

        let mut state = self.state.write();
        state.entity = Some(entity);
        state.language_code = Some(language_code);
    }

    /// 清空所有缓存的口音及当前口音选择
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.entities.clear();
        state.active_language_accent_code = None;
        state.loaded = false;
    }

    pub fn set_language_code(&self, language_code: impl Into<String>) {
        self.state.write().language_code = Some(language_code.into());
    }

    pub fn language_code(&self) -> Option<String> {
        self.state.read().language_code.clone()
    }

    pub fn set_active_language_accent_code(&self, language_accent_code: impl Into<String>) {
        self.state.write().active_language_accent_code = Some(language_accent_code.into());
    }

    pub fn active_language_accent_code(&self) -> Option<String> {
        self.state.read().active_language_accent_code.clone()
    }

    /// 从后端拉取当前实体 / 语言的全部口音语音
    ///
    /// 失败时缓存内容保持不变，loaded 不会被置为 true
    pub async fn fetch_entity_voiceovers(&self) -> Result<(), ApplicationError> {
        let query = {
            let mut state = self.state.write();
            let entity = state.entity.clone().ok_or_else(|| {
                ApplicationError::invalid_state("entity voiceovers cache is not initialized")
            })?;
            let language_code = state.language_code.clone().ok_or_else(|| {
                ApplicationError::invalid_state("language code is not set")
            })?;
            state.loaded = false;

            EntityVoiceoversQuery {
                entity_type: entity.entity_type,
                entity_id: entity.entity_id,
                entity_version: entity.entity_version,
                language_code,
            }
        };

        let entity_voiceovers_list = self
            .backend
            .fetch_entity_voiceovers_by_language_code(&query)
            .await
            .map_err(|e| {
                tracing::debug!(
                    entity_id = %query.entity_id,
                    language_code = %query.language_code,
                    error = %e,
                    "Entity voiceovers fetch failed"
                );
                e
            })?;

        let count = entity_voiceovers_list.len();
        {
            let mut state = self.state.write();
            index_into(&mut state.entities, entity_voiceovers_list);
            state.loaded = true;
        }

        tracing::info!(
            entity_id = %query.entity_id,
            entity_type = %query.entity_type,
            entity_version = query.entity_version,
            language_code = %query.language_code,
            accent_count = count,
            "Entity voiceovers loaded"
        );

        self.loaded_signal.emit();
        Ok(())
    }

    /// 按各实例自身的口音代码建立索引，同一口音后者覆盖前者
    pub fn index_entity_voiceovers(&self, entity_voiceovers_list: Vec<EntityVoiceovers>) {
        let mut state = self.state.write();
        index_into(&mut state.entities, entity_voiceovers_list);
    }

    pub fn is_entity_voiceovers_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// 订阅加载完成通知（不重放）
    pub fn subscribe_loaded(&self) -> broadcast::Receiver<()> {
        self.loaded_signal.subscribe()
    }

    pub fn entity_voiceovers_by_language_accent_code(
        &self,
        language_accent_code: &str,
    ) -> Option<Arc<EntityVoiceovers>> {
        self.state.read().entities.get(language_accent_code).cloned()
    }

    /// 未设置当前口音时，选择枚举顺序中的第一个口音并记住
    pub fn ensure_active_accent_selected(&self) -> Option<String> {
        let mut state = self.state.write();
        if state.active_language_accent_code.is_none() {
            state.active_language_accent_code = state.entities.keys().next().cloned();
            if let Some(code) = &state.active_language_accent_code {
                tracing::debug!(language_accent_code = %code, "Active language accent defaulted");
            }
        }
        state.active_language_accent_code.clone()
    }

    /// 当前口音的语音
    ///
    /// 副作用: 未设置当前口音时会先调用 `ensure_active_accent_selected`
    pub fn active_entity_voiceovers(&self) -> Option<Arc<EntityVoiceovers>> {
        let code = self.ensure_active_accent_selected()?;
        self.entity_voiceovers_by_language_accent_code(&code)
    }

    /// 直接写入，不校验 value 的口音代码与 key 是否一致
    pub fn add_entity_voiceovers(
        &self,
        language_accent_code: impl Into<String>,
        entity_voiceovers: EntityVoiceovers,
    ) {
        self.state
            .write()
            .entities
            .insert(language_accent_code.into(), Arc::new(entity_voiceovers));
    }

    /// 口音不存在时为空操作
    pub fn remove_entity_voiceovers(&self, language_accent_code: &str) {
        if self
            .state
            .write()
            .entities
            .shift_remove(language_accent_code)
            .is_some()
        {
            tracing::debug!(language_accent_code = %language_accent_code, "Entity voiceovers removed");
        }
    }

    pub fn language_accent_codes(&self) -> Vec<String> {
        self.state.read().entities.keys().cloned().collect()
    }

    /// 跨口音汇总: content_id -> 所有口音的语音
    ///
    /// 口音按枚举顺序拼接，每个口音内 manual 在 auto 之前
    pub fn all_content_ids_to_voiceovers(&self) -> IndexMap<String, Vec<Voiceover>> {
        let state = self.state.read();
        let mut content_id_to_voiceovers: IndexMap<String, Vec<Voiceover>> = IndexMap::new();

        for entity_voiceovers in state.entities.values() {
            for (content_id, pair) in entity_voiceovers.voiceovers_mapping() {
                content_id_to_voiceovers
                    .entry(content_id.clone())
                    .or_default()
                    .extend(pair.iter().cloned());
            }
        }

        content_id_to_voiceovers
    }
}

fn index_into(
    entities: &mut IndexMap<String, Arc<EntityVoiceovers>>,
    entity_voiceovers_list: Vec<EntityVoiceovers>,
) {
    for entity_voiceovers in entity_voiceovers_list {
        let orphaned = entity_voiceovers.orphaned_offset_content_ids();
        if !orphaned.is_empty() {
            tracing::warn!(
                language_accent_code = %entity_voiceovers.language_accent_code(),
                content_ids = ?orphaned,
                "Audio offsets present without automatic voiceover"
            );
        }
        entities.insert(
            entity_voiceovers.language_accent_code().to_string(),
            Arc::new(entity_voiceovers),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::BackendError;
    use crate::domain::voiceover::ContentVoiceovers;
    use crate::infrastructure::adapters::FakeVoiceoverBackend;
    use tokio::sync::broadcast::error::TryRecvError;

    fn voiceover(filename: &str) -> Voiceover {
        Voiceover::new(filename, 1000, false, 5.0).unwrap()
    }

    fn entity_voiceovers(
        accent: &str,
        content: Vec<(&str, Option<Voiceover>, Option<Voiceover>)>,
    ) -> EntityVoiceovers {
        let mapping = content
            .into_iter()
            .map(|(id, manual, auto)| (id.to_string(), ContentVoiceovers::new(manual, auto)))
            .collect();
        EntityVoiceovers::new("exp_id", "exploration", 1, accent, mapping, IndexMap::new())
    }

    fn cache_with(backend: Arc<FakeVoiceoverBackend>) -> EntityVoiceoversCache {
        let cache = EntityVoiceoversCache::new(backend);
        cache.init("exp_id", "exploration", 1, "en");
        cache
    }

    #[tokio::test]
    async fn test_fetch_indexes_by_accent() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        backend.push_response(Ok(vec![
            entity_voiceovers("en-US", vec![("content0", Some(voiceover("a.mp3")), None)]),
            entity_voiceovers("en-IN", vec![("content0", None, Some(voiceover("b.mp3")))]),
        ]));
        let cache = cache_with(backend.clone());

        assert!(!cache.is_entity_voiceovers_loaded());
        cache.fetch_entity_voiceovers().await.unwrap();
        assert!(cache.is_entity_voiceovers_loaded());

        let codes = cache.language_accent_codes();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"en-US".to_string()));
        assert!(codes.contains(&"en-IN".to_string()));

        let en_us = cache.entity_voiceovers_by_language_accent_code("en-US").unwrap();
        assert_eq!(en_us.manual_voiceover("content0").unwrap().filename(), "a.mp3");
        let en_in = cache.entity_voiceovers_by_language_accent_code("en-IN").unwrap();
        assert_eq!(en_in.automatic_voiceover("content0").unwrap().filename(), "b.mp3");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entity_type, "exploration");
        assert_eq!(calls[0].entity_id, "exp_id");
        assert_eq!(calls[0].entity_version, 1);
        assert_eq!(calls[0].language_code, "en");
    }

    #[tokio::test]
    async fn test_fetch_same_accent_later_entry_wins() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        backend.push_response(Ok(vec![
            entity_voiceovers("en-US", vec![("content0", Some(voiceover("old.mp3")), None)]),
            entity_voiceovers("en-US", vec![("content0", Some(voiceover("new.mp3")), None)]),
        ]));
        let cache = cache_with(backend);

        cache.fetch_entity_voiceovers().await.unwrap();

        assert_eq!(cache.language_accent_codes(), vec!["en-US"]);
        let en_us = cache.entity_voiceovers_by_language_accent_code("en-US").unwrap();
        assert_eq!(en_us.manual_voiceover("content0").unwrap().filename(), "new.mp3");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_unchanged() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        backend.push_response(Err(BackendError::ServiceError("HTTP 500".to_string())));
        let cache = cache_with(backend);
        cache.add_entity_voiceovers("en-US", entity_voiceovers("en-US", vec![]));
        let mut loaded = cache.subscribe_loaded();

        let result = cache.fetch_entity_voiceovers().await;

        assert!(matches!(result, Err(ApplicationError::Backend(_))));
        assert!(!cache.is_entity_voiceovers_loaded());
        assert_eq!(cache.language_accent_codes(), vec!["en-US"]);
        assert_eq!(loaded.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_fetch_before_init_is_invalid_state() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        let result = cache.fetch_entity_voiceovers().await;
        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_loaded_signal_once_per_fetch_without_replay() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        backend.push_response(Ok(vec![entity_voiceovers("en-US", vec![])]));
        backend.push_response(Ok(vec![entity_voiceovers("en-US", vec![])]));
        let cache = cache_with(backend);

        let mut early = cache.subscribe_loaded();
        cache.fetch_entity_voiceovers().await.unwrap();
        let mut late = cache.subscribe_loaded();

        assert!(early.try_recv().is_ok());
        assert_eq!(early.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(late.try_recv(), Err(TryRecvError::Empty));

        cache.fetch_entity_voiceovers().await.unwrap();
        assert!(early.try_recv().is_ok());
        assert!(late.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_interleaved_fetches_last_writer_wins() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        let release_first = backend.push_gated_response(Ok(vec![entity_voiceovers(
            "en-US",
            vec![("content0", Some(voiceover("first.mp3")), None)],
        )]));
        backend.push_response(Ok(vec![
            entity_voiceovers("en-US", vec![("content0", Some(voiceover("second.mp3")), None)]),
            entity_voiceovers("en-IN", vec![]),
        ]));
        let cache = cache_with(backend);

        let first = cache.fetch_entity_voiceovers();
        let second = async {
            let result = cache.fetch_entity_voiceovers().await;
            let _ = release_first.send(());
            result
        };
        let (first, second) = tokio::join!(first, second);
        first.unwrap();
        second.unwrap();

        let en_us = cache.entity_voiceovers_by_language_accent_code("en-US").unwrap();
        assert_eq!(en_us.manual_voiceover("content0").unwrap().filename(), "first.mp3");
        assert!(cache.entity_voiceovers_by_language_accent_code("en-IN").is_some());
        assert!(cache.is_entity_voiceovers_loaded());
    }

    #[tokio::test]
    async fn test_loaded_is_false_while_fetch_in_flight() {
        let backend = Arc::new(FakeVoiceoverBackend::new());
        backend.push_response(Ok(vec![entity_voiceovers("en-US", vec![])]));
        let release = backend.push_gated_response(Ok(vec![entity_voiceovers("en-IN", vec![])]));
        let cache = cache_with(backend);

        cache.fetch_entity_voiceovers().await.unwrap();
        assert!(cache.is_entity_voiceovers_loaded());

        let refetch = cache.fetch_entity_voiceovers();
        let observe = async {
            tokio::task::yield_now().await;
            let loaded_during_fetch = cache.is_entity_voiceovers_loaded();
            let _ = release.send(());
            loaded_during_fetch
        };
        let (result, loaded_during_fetch) = tokio::join!(refetch, observe);
        result.unwrap();

        assert!(!loaded_during_fetch);
        assert!(cache.is_entity_voiceovers_loaded());
        assert!(cache.entity_voiceovers_by_language_accent_code("en-IN").is_some());
    }

    #[test]
    fn test_active_accent_defaults_to_first() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        assert!(cache.active_entity_voiceovers().is_none());
        assert_eq!(cache.active_language_accent_code(), None);

        cache.index_entity_voiceovers(vec![
            entity_voiceovers("en-US", vec![]),
            entity_voiceovers("en-IN", vec![]),
        ]);

        let active = cache.active_entity_voiceovers().unwrap();
        assert_eq!(active.language_accent_code(), "en-US");
        assert_eq!(cache.active_language_accent_code(), Some("en-US".to_string()));

        // 已锁定，插入新口音后不变
        cache.add_entity_voiceovers("ar-EG", entity_voiceovers("ar-EG", vec![]));
        let active = cache.active_entity_voiceovers().unwrap();
        assert_eq!(active.language_accent_code(), "en-US");
    }

    #[test]
    fn test_explicit_active_accent() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        cache.index_entity_voiceovers(vec![
            entity_voiceovers("en-US", vec![]),
            entity_voiceovers("en-IN", vec![]),
        ]);

        cache.set_active_language_accent_code("en-IN");
        let active = cache.active_entity_voiceovers().unwrap();
        assert_eq!(active.language_accent_code(), "en-IN");

        cache.set_active_language_accent_code("fr-FR");
        assert!(cache.active_entity_voiceovers().is_none());
    }

    #[test]
    fn test_add_and_remove_entity_voiceovers() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        assert!(cache.entity_voiceovers_by_language_accent_code("en-US").is_none());

        cache.add_entity_voiceovers("en-US", entity_voiceovers("en-US", vec![]));
        assert!(cache.entity_voiceovers_by_language_accent_code("en-US").is_some());

        cache.remove_entity_voiceovers("en-US");
        assert!(cache.entity_voiceovers_by_language_accent_code("en-US").is_none());

        // 重复删除为空操作
        cache.remove_entity_voiceovers("en-US");
        assert!(cache.entity_voiceovers_by_language_accent_code("en-US").is_none());
        assert!(cache.language_accent_codes().is_empty());
    }

    #[test]
    fn test_add_does_not_validate_accent_key() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        cache.add_entity_voiceovers("hi-IN", entity_voiceovers("en-US", vec![]));

        let stored = cache.entity_voiceovers_by_language_accent_code("hi-IN").unwrap();
        assert_eq!(stored.language_accent_code(), "en-US");
    }

    #[test]
    fn test_all_content_ids_to_voiceovers() {
        let v1 = voiceover("v1.mp3");
        let v2 = voiceover("v2.mp3");
        let v3 = voiceover("v3.mp3");
        let v4 = voiceover("v4.mp3");

        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        cache.add_entity_voiceovers(
            "en-US",
            entity_voiceovers("en-US", vec![("content0", Some(v1.clone()), None)]),
        );
        cache.add_entity_voiceovers(
            "en-IN",
            entity_voiceovers(
                "en-IN",
                vec![
                    ("content0", Some(v2.clone()), Some(v3.clone())),
                    ("content1", None, Some(v4.clone())),
                ],
            ),
        );

        let aggregated = cache.all_content_ids_to_voiceovers();

        assert_eq!(aggregated.len(), 2);
        assert_eq!(aggregated["content0"], vec![v1, v2, v3]);
        assert_eq!(aggregated["content1"], vec![v4]);
    }

    #[test]
    fn test_init_keeps_cached_accents_and_clear_resets() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        cache.init("exp_id", "exploration", 1, "en");
        cache.add_entity_voiceovers("en-US", entity_voiceovers("en-US", vec![]));
        cache.set_active_language_accent_code("en-US");

        cache.init("exp_2", "exploration", 4, "hi");
        assert_eq!(cache.language_code(), Some("hi".to_string()));
        assert_eq!(cache.language_accent_codes(), vec!["en-US"]);

        cache.clear();
        assert!(cache.language_accent_codes().is_empty());
        assert_eq!(cache.active_language_accent_code(), None);
    }

    #[test]
    fn test_set_language_code() {
        let cache = EntityVoiceoversCache::new(Arc::new(FakeVoiceoverBackend::new()));
        cache.init("exp_id", "exploration", 0, "en");
        assert_eq!(cache.language_code(), Some("en".to_string()));

        cache.set_language_code("hi");
        assert_eq!(cache.language_code(), Some("hi".to_string()));
    }
}

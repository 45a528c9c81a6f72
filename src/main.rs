//! Voiceover Cache - 命令行演示入口
//!
//! 加载配置中的实体，拉取全部口音的语音并输出汇总

use std::sync::Arc;

use voiceover_cache::config::{load_config, print_config};
use voiceover_cache::infrastructure::{
    HttpVoiceoverBackend, HttpVoiceoverBackendConfig, VoiceoverContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},voiceover_cache={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    print_config(&config);

    if config.entity.entity_id.is_empty() {
        anyhow::bail!("entity.entity_id is not configured (set VOICEOVER_ENTITY__ENTITY_ID)");
    }

    let backend_config = HttpVoiceoverBackendConfig::new(&config.backend.base_url)
        .with_timeout(config.backend.timeout_secs);
    let backend = Arc::new(HttpVoiceoverBackend::new(backend_config)?);
    let context = VoiceoverContext::new(backend);

    if let Err(e) = context.load_language_capabilities().await {
        tracing::warn!(error = %e, "Voiceover language capabilities unavailable");
    }

    let cache = context.cache();
    cache.init(
        &config.entity.entity_id,
        &config.entity.entity_type,
        config.entity.entity_version,
        &config.entity.language_code,
    );
    cache.fetch_entity_voiceovers().await?;

    for accent in cache.language_accent_codes() {
        let Some(entity_voiceovers) = cache.entity_voiceovers_by_language_accent_code(&accent)
        else {
            continue;
        };
        let manual = entity_voiceovers
            .voiceovers_mapping()
            .values()
            .filter(|pair| pair.manual.is_some())
            .count();
        let auto = entity_voiceovers
            .voiceovers_mapping()
            .values()
            .filter(|pair| pair.auto.is_some())
            .count();
        tracing::info!(
            language_accent_code = %accent,
            description = ?context.language_management().language_accent_description(&accent),
            content_count = entity_voiceovers.voiceovers_mapping().len(),
            manual,
            auto,
            "Entity voiceovers summary"
        );
    }

    let eligible = context.eligible_autogeneration_accents(&config.entity.language_code)?;
    tracing::info!(
        language_code = %config.entity.language_code,
        accents = ?eligible,
        "Accents eligible for automatic voiceover generation"
    );

    Ok(())
}

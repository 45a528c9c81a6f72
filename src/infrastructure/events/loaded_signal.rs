//! Loaded Signal Implementation
//!
//! 实体语音加载完成的一次性通知

use tokio::sync::broadcast;

/// 加载完成信号
///
/// 每次成功 fetch 发送一次，订阅前已发送的通知不会重放
pub struct LoadedSignal {
    channel: broadcast::Sender<()>,
}

impl LoadedSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { channel: tx }
    }

    /// 订阅加载完成通知
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.channel.subscribe()
    }

    /// 同步通知所有当前订阅者
    pub fn emit(&self) {
        if let Err(e) = self.channel.send(()) {
            tracing::debug!(error = %e, "Failed to publish loaded signal (no receivers)");
        }
    }
}

impl Default for LoadedSignal {
    fn default() -> Self {
        Self::new()
    }
}

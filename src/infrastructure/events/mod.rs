//! Events - 加载完成通知

mod loaded_signal;

pub use loaded_signal::LoadedSignal;

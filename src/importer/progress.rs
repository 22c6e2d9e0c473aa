// ==========================================
// KOL 导入系统 - 导入进度与取消
// ==========================================
// 职责: 进度监听接口 / 协作式取消标记
// 说明: 行与行之间是天然检查点，取消只在行间生效
// ==========================================

use crate::domain::import::ImportProgress;
use crate::domain::types::ImportState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ==========================================
// ImportProgressListener Trait
// ==========================================
pub trait ImportProgressListener: Send + Sync {
    /// 每处理完一行（成功/失败/跳过）调用一次
    fn on_progress(&self, progress: ImportProgress);

    /// 进入 Running / Completed 时调用（Idle 是运行前的初始状态，见 KolImporterImpl::state）
    fn on_state(&self, _state: ImportState) {}
}

/// 默认监听器（什么都不做）
pub struct NoopProgressListener;

impl ImportProgressListener for NoopProgressListener {
    fn on_progress(&self, _progress: ImportProgress) {}
}

impl<F> ImportProgressListener for F
where
    F: Fn(ImportProgress) + Send + Sync,
{
    fn on_progress(&self, progress: ImportProgress) {
        self(progress)
    }
}

// ==========================================
// CancellationFlag - 取消标记
// ==========================================
// 可克隆，克隆之间共享同一个标记
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

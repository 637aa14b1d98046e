//! 取消標記

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 共享取消標記
///
/// 複本共用同一個旗標，任一方呼叫 [`cancel`](Self::cancel) 後所有複本都可見。
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 要求取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!handle.is_cancelled());

        token.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_token_crosses_threads() {
        let token = CancellationToken::new();
        let handle = token.clone();

        std::thread::spawn(move || handle.cancel())
            .join()
            .unwrap();

        assert!(token.is_cancelled());
    }
}

//! CallbackDecorator port - add/remove のコールバックに横断的な処理を差し込む
//!
//! デコレータはコールバックの登録時に一度だけ適用されます。
//! 何もしない場合も `None` ではなく `noop()` を明示的に渡します。

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Added,
    Removed,
}

/// A single add or remove on a report container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationEvent<'a> {
    pub kind: MutationKind,
    pub name: &'a str,
}

pub type MutationCallback = Arc<dyn Fn(&MutationEvent<'_>) + Send + Sync>;

/// CallbackDecorator はコールバックを包んで返す
pub trait CallbackDecorator: Send + Sync {
    fn decorate(&self, callback: MutationCallback) -> MutationCallback;
}

/// Returns callbacks unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecorator;

impl CallbackDecorator for NoopDecorator {
    fn decorate(&self, callback: MutationCallback) -> MutationCallback {
        callback
    }
}

pub fn noop() -> Arc<dyn CallbackDecorator> {
    Arc::new(NoopDecorator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn noop_returns_the_same_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let callback: MutationCallback = Arc::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let decorated = noop().decorate(callback.clone());
        assert!(Arc::ptr_eq(&decorated, &callback));

        decorated(&MutationEvent {
            kind: MutationKind::Added,
            name: "html",
        });
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}

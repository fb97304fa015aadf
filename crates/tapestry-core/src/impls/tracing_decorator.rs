//! TracingDecorator - 変更コールバックの前に tracing でログを出すデコレータ

use std::sync::Arc;

use tracing::debug;

use crate::ports::{CallbackDecorator, MutationCallback, MutationEvent};

#[derive(Debug, Clone)]
pub struct TracingDecorator {
    label: Arc<str>,
}

impl TracingDecorator {
    /// `label` identifies the container in log output, e.g. a task path.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self { label: label.into() }
    }
}

impl CallbackDecorator for TracingDecorator {
    fn decorate(&self, callback: MutationCallback) -> MutationCallback {
        let label = self.label.clone();
        Arc::new(move |event: &MutationEvent<'_>| {
            debug!(
                container = %label,
                kind = ?event.kind,
                report = event.name,
                "report container changed"
            );
            callback(event);
        })
    }
}

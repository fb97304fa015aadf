//! DeprecationLogger - 既定の DeprecationSink
//!
//! # ポリシー
//! - **summary**: 識別子ごとに初回だけ警告（既定）
//! - **all**: 毎回警告
//! - **none**: 記録のみ
//! - **fail**: 初回だけ警告し、ビルド終了時の `check()` でエラーにする
//!
//! どのポリシーでも `nag_user_of` 自体は呼び出し元を中断しません。

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::errors::DeprecationError;
use crate::ports::{Clock, DeprecationSink, SystemClock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationPolicy {
    #[default]
    Summary,
    All,
    None,
    Fail,
}

/// One deprecated API and how often the build used it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationNotice {
    pub identifier: String,
    pub count: usize,
    pub first_seen: DateTime<Utc>,
}

pub struct DeprecationLogger {
    policy: DeprecationPolicy,
    clock: Box<dyn Clock>,
    notices: Mutex<BTreeMap<String, DeprecationNotice>>,
}

impl DeprecationLogger {
    pub fn new(policy: DeprecationPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }

    pub fn with_clock(policy: DeprecationPolicy, clock: impl Clock + 'static) -> Self {
        Self {
            policy,
            clock: Box::new(clock),
            notices: Mutex::new(BTreeMap::new()),
        }
    }

    /// Notices recorded so far, ordered by identifier.
    pub fn notices(&self) -> Vec<DeprecationNotice> {
        self.lock().values().cloned().collect()
    }

    /// How many times `identifier` was reported.
    pub fn count(&self, identifier: &str) -> usize {
        self.lock().get(identifier).map_or(0, |n| n.count)
    }

    pub fn total(&self) -> usize {
        self.lock().values().map(|n| n.count).sum()
    }

    /// End-of-build check; only the `fail` policy turns notices into an error.
    pub fn check(&self) -> Result<(), DeprecationError> {
        if self.policy != DeprecationPolicy::Fail {
            return Ok(());
        }
        let notices = self.lock();
        if notices.is_empty() {
            return Ok(());
        }
        Err(DeprecationError {
            count: notices.values().map(|n| n.count).sum(),
            identifiers: notices.keys().cloned().collect(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, DeprecationNotice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DeprecationLogger {
    fn default() -> Self {
        Self::new(DeprecationPolicy::default())
    }
}

impl DeprecationSink for DeprecationLogger {
    fn nag_user_of(&self, identifier: &str) {
        let now = self.clock.now();
        let first = {
            let mut notices = self.lock();
            let notice = notices
                .entry(identifier.to_string())
                .or_insert_with(|| DeprecationNotice {
                    identifier: identifier.to_string(),
                    count: 0,
                    first_seen: now,
                });
            notice.count += 1;
            notice.count == 1
        };

        let should_warn = match self.policy {
            DeprecationPolicy::All => true,
            DeprecationPolicy::Summary | DeprecationPolicy::Fail => first,
            DeprecationPolicy::None => false,
        };
        if should_warn {
            warn!(
                identifier,
                "{identifier} has been deprecated and is scheduled to be removed"
            );
        } else {
            debug!(identifier, "deprecation notice recorded");
        }
    }
}

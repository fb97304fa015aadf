//! ServiceRegistry - Project ごとのサービス登録簿（capability 型 → インスタンス）
//!
//! # 学習ポイント
//! - `TypeId::of::<S>()` は `S: ?Sized` でも使えるので `dyn Trait` をキーにできる
//! - 値は `Arc<S>` を `Box<dyn Any>` に包んで保持し、取り出し時に downcast する

use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    name: &'static str,
    service: Box<dyn Any + Send + Sync>,
}

/// Registry of services keyed by capability type.
///
/// Design:
/// - `register` overwrites and hands back the previous binding.
/// - `get` clones the `Arc`, so callers keep the instance they resolved even
///   if the binding is replaced later.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Entry>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    pub fn register<S>(&mut self, service: Arc<S>) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let entry = Entry {
            name: any::type_name::<S>(),
            service: Box::new(service),
        };
        self.services
            .insert(TypeId::of::<S>(), entry)
            .and_then(|previous| previous.service.downcast::<Arc<S>>().ok())
            .map(|previous| *previous)
    }

    pub fn get<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.services
            .get(&TypeId::of::<S>())
            .and_then(|entry| entry.service.downcast_ref::<Arc<S>>())
            .cloned()
    }

    pub fn contains<S>(&self) -> bool
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.services.contains_key(&TypeId::of::<S>())
    }

    /// Type names of every registered capability, sorted.
    pub fn registered_services(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.services.values().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

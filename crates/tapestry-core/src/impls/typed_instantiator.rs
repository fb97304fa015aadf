//! TypedInstantiator - レポート型ごとのコンストラクタを登録・管理
//!
//! # 学習ポイント
//! - `HashMap<TypeId, _>` での型消去されたクロージャの管理
//! - Generic method での登録（`register::<R>`）と、object-safe な `Instantiator` の両立
//! - 生成結果は `Box<dyn Any>` に包み、container 側で `R` に戻す

use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::InstantiationError;
use crate::domain::report::Report;
use crate::ports::{Instantiator, InstantiationRequest, TaskContext};

type Constructor = Arc<
    dyn Fn(&str, &dyn TaskContext) -> Result<Box<dyn Any + Send + Sync>, InstantiationError>
        + Send
        + Sync,
>;

struct Registration {
    type_name: &'static str,
    constructor: Constructor,
}

/// TypedInstantiator は型付きコンストラクタを登録して `Instantiator` として振る舞う
///
/// # 使用例
/// ```ignore
/// let mut instantiator = TypedInstantiator::new();
/// instantiator.register::<SimpleReport, _>(|name, ctx| Ok(SimpleReport::new(...)))?;
/// project.register_service::<dyn Instantiator>(Arc::new(instantiator));
/// ```
#[derive(Default)]
pub struct TypedInstantiator {
    constructors: HashMap<TypeId, Registration>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("constructor for report type '{0}' is already registered")]
    AlreadyRegistered(&'static str),
}

impl TypedInstantiator {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    pub fn register<R, F>(&mut self, constructor: F) -> Result<(), RegistryError>
    where
        R: Report,
        F: Fn(&str, &dyn TaskContext) -> Result<R, InstantiationError> + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<R>();
        let type_name = any::type_name::<R>();
        if self.constructors.contains_key(&type_id) {
            return Err(RegistryError::AlreadyRegistered(type_name));
        }
        let erased: Constructor = Arc::new(move |name: &str, context: &dyn TaskContext| {
            constructor(name, context).map(|report| Box::new(report) as Box<dyn Any + Send + Sync>)
        });
        self.constructors.insert(
            type_id,
            Registration {
                type_name,
                constructor: erased,
            },
        );
        Ok(())
    }

    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.constructors.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl Instantiator for TypedInstantiator {
    fn instantiate(
        &self,
        request: &InstantiationRequest<'_>,
    ) -> Result<Box<dyn Any + Send + Sync>, InstantiationError> {
        let registration = self
            .constructors
            .get(&request.type_id)
            .ok_or(InstantiationError::UnknownType {
                type_name: request.report_type,
            })?;
        debug!(
            task = %request.context.task_path(),
            task_id = %request.context.task_id(),
            report = request.name,
            report_type = registration.type_name,
            "instantiating report"
        );
        (registration.constructor)(request.name, request.context)
    }
}

//! Project - タスクとサービスの持ち主
//!
//! Project は `Arc<Project>` として共有され、タスクからは `Weak` で参照されます。
//! サービスは `RwLock<ServiceRegistry>` に入っているので、構築後も差し替え可能です。

use std::any;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use super::errors::ConfigurationError;
use super::ids::ProjectId;
use super::services::ServiceRegistry;
use super::task::Task;
use crate::ports::{DeprecationSink, IdGenerator};

pub const DEFAULT_REPORTS_DIR_NAME: &str = "reports";

pub struct Project {
    id: ProjectId,
    name: String,
    build_dir: PathBuf,
    reports_dir_name: String,
    services: RwLock<ServiceRegistry>,
    deprecation: Arc<dyn DeprecationSink>,
    id_generator: Arc<dyn IdGenerator>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        build_dir: impl Into<PathBuf>,
        deprecation: Arc<dyn DeprecationSink>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id_generator.generate_project_id(),
            name: name.into(),
            build_dir: build_dir.into(),
            reports_dir_name: DEFAULT_REPORTS_DIR_NAME.to_string(),
            services: RwLock::new(ServiceRegistry::new()),
            deprecation,
            id_generator,
        })
    }

    /// Same as [`Project::new`] with a custom reports directory name.
    pub fn with_reports_dir_name(
        name: impl Into<String>,
        build_dir: impl Into<PathBuf>,
        reports_dir_name: impl Into<String>,
        deprecation: Arc<dyn DeprecationSink>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id_generator.generate_project_id(),
            name: name.into(),
            build_dir: build_dir.into(),
            reports_dir_name: reports_dir_name.into(),
            services: RwLock::new(ServiceRegistry::new()),
            deprecation,
            id_generator,
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.build_dir.join(&self.reports_dir_name)
    }

    pub fn deprecation_sink(&self) -> Arc<dyn DeprecationSink> {
        self.deprecation.clone()
    }

    pub fn services(&self) -> RwLockReadGuard<'_, ServiceRegistry> {
        self.services.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind `service` for capability `S`, returning the previous binding.
    pub fn register_service<S>(&self, service: Arc<S>) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        debug!(project = %self.name, service = any::type_name::<S>(), "registering service");
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(service)
    }

    /// Look up capability `S`; an unregistered capability is an error.
    pub fn service<S>(&self) -> Result<Arc<S>, ConfigurationError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.services()
            .get::<S>()
            .ok_or_else(|| ConfigurationError::MissingService {
                project: self.name.clone(),
                service: any::type_name::<S>(),
            })
    }

    pub fn create_task(self: &Arc<Self>, name: impl Into<String>) -> Task {
        Task::new(
            self.id_generator.generate_task_id(),
            name.into(),
            &self.name,
            Arc::downgrade(self),
        )
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("build_dir", &self.build_dir)
            .field("services", &self.services().registered_services())
            .finish()
    }
}

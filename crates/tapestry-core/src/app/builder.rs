//! ProjectBuilder - Project の構築とサービスのワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 期待するサービスが揃っていなければ build() で失敗
//! - 開発体験の改善（明確なエラーメッセージ）

use std::any;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::settings::BuildSettings;
use crate::domain::{DEFAULT_REPORTS_DIR_NAME, Project, ServiceRegistry};
use crate::impls::DeprecationLogger;
use crate::ports::{DeprecationSink, IdGenerator, SystemClock, UlidGenerator};

type Registration = Box<dyn FnOnce(&Project)>;

struct Expectation {
    name: &'static str,
    present: fn(&ServiceRegistry) -> bool,
}

/// ProjectBuilder は Project を構築
///
/// # 使用例
/// ```ignore
/// let project = ProjectBuilder::new("app")
///     .service::<dyn Instantiator>(Arc::new(instantiator))
///     .expect_service::<dyn Instantiator>()
///     .build()?;
/// ```
pub struct ProjectBuilder {
    name: String,
    build_dir: PathBuf,
    reports_dir_name: String,
    deprecation: Option<Arc<dyn DeprecationSink>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
    registrations: Vec<Registration>,
    expectations: Vec<Expectation>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing services: {0:?}. These services were expected but not registered.")]
    MissingServices(Vec<&'static str>),
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_dir: PathBuf::from("build"),
            reports_dir_name: DEFAULT_REPORTS_DIR_NAME.to_string(),
            deprecation: None,
            id_generator: None,
            registrations: Vec::new(),
            expectations: Vec::new(),
        }
    }

    /// Name, build dir and reports dir name from settings.
    ///
    /// The deprecation policy is not applied here: the caller creates the
    /// `DeprecationLogger` so it can run the end-of-build check.
    pub fn from_settings(settings: &BuildSettings) -> Self {
        Self::new(settings.project_name.clone())
            .build_dir(settings.build_dir.clone())
            .reports_dir_name(settings.reports_dir_name.clone())
    }

    pub fn build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = build_dir.into();
        self
    }

    pub fn reports_dir_name(mut self, name: impl Into<String>) -> Self {
        self.reports_dir_name = name.into();
        self
    }

    pub fn deprecation(mut self, sink: Arc<dyn DeprecationSink>) -> Self {
        self.deprecation = Some(sink);
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    pub fn service<S>(mut self, service: Arc<S>) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.registrations.push(Box::new(move |project: &Project| {
            project.register_service(service);
        }));
        self
    }

    /// Require capability `S` to be registered by the time `build()` runs.
    pub fn expect_service<S>(mut self) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.expectations.push(Expectation {
            name: any::type_name::<S>(),
            present: |registry| registry.contains::<S>(),
        });
        self
    }

    pub fn build(self) -> Result<Arc<Project>, BuildError> {
        let deprecation = self
            .deprecation
            .unwrap_or_else(|| Arc::new(DeprecationLogger::default()) as Arc<dyn DeprecationSink>);
        let id_generator = self
            .id_generator
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock)) as Arc<dyn IdGenerator>);
        let project = Project::with_reports_dir_name(
            self.name,
            self.build_dir,
            self.reports_dir_name,
            deprecation,
            id_generator,
        );
        for register in self.registrations {
            register(&project);
        }

        let missing: Vec<&'static str> = {
            let services: &ServiceRegistry = &project.services();
            self.expectations
                .iter()
                .filter(|e| !(e.present)(services))
                .map(|e| e.name)
                .collect()
        };
        if !missing.is_empty() {
            return Err(BuildError::MissingServices(missing));
        }

        info!(project = project.name(), id = %project.id(), "project configured");
        Ok(project)
    }
}

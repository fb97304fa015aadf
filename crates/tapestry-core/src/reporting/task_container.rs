//! TaskReportContainer - 1 つのタスクに紐づいた ReportContainer
//!
//! # 学習ポイント
//! - 構築時に Task → Project → `dyn Instantiator` を一度だけ解決して保持する
//!   （後から Project のサービスを差し替えても影響しない）
//! - Task は `&'t Task` で借用するだけ。container はタスクより長生きできない
//! - 旧 API（デコレータ無し）は `#[deprecated]` を付けた薄い転送 + 非推奨通知 1 回
//! - 継承の代わりに `Deref` で ReportContainer の操作をそのまま使えるようにする

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::debug;

use super::container::ReportContainer;
use crate::domain::errors::{ConfigurationError, ReportError};
use crate::domain::project::Project;
use crate::domain::report::{Report, ReportType};
use crate::domain::task::Task;
use crate::ports::{CallbackDecorator, Instantiator, noop};

/// Identifier reported to the deprecation channel by [`TaskReportContainer::new_legacy`].
pub const LEGACY_CONSTRUCTOR: &str =
    "Internal API constructor TaskReportContainer::new_legacy(ReportType<R>, &Task)";

/// A report container bound to one owning task.
///
/// # 使用例
/// ```ignore
/// let task = project.create_task("test");
/// let mut reports = TaskReportContainer::new(ReportType::<SimpleReport>::of(), &task, noop())?;
/// reports.create("html")?.set_enabled(true);
/// assert!(std::ptr::eq(reports.task(), &task));
/// ```
pub struct TaskReportContainer<'t, R: Report> {
    container: ReportContainer<R>,
    task: &'t Task,
}

impl<'t, R: Report> TaskReportContainer<'t, R> {
    /// Resolve the instantiator from `task`'s project and bind the container to `task`.
    ///
    /// Fails with [`ConfigurationError`] if the task has no live project or the
    /// project has no `dyn Instantiator` registered.
    pub fn new(
        report_type: ReportType<R>,
        task: &'t Task,
        decorator: Arc<dyn CallbackDecorator>,
    ) -> Result<Self, ConfigurationError> {
        Self::bind(report_type, task, decorator).map(|(container, _project)| container)
    }

    /// Old entry point without a decorator; same as `new(report_type, task, noop())`.
    #[deprecated(
        note = "Use `TaskReportContainer::new` with an explicit decorator such as `ports::noop()`."
    )]
    pub fn new_legacy(
        report_type: ReportType<R>,
        task: &'t Task,
    ) -> Result<Self, ConfigurationError> {
        let (container, project) = Self::bind(report_type, task, noop())?;
        project.deprecation_sink().nag_user_of(LEGACY_CONSTRUCTOR);
        Ok(container)
    }

    fn bind(
        report_type: ReportType<R>,
        task: &'t Task,
        decorator: Arc<dyn CallbackDecorator>,
    ) -> Result<(Self, Arc<Project>), ConfigurationError> {
        let project = task.project()?;
        let instantiator = project.service::<dyn Instantiator>()?;
        debug!(
            task = task.path(),
            report_type = report_type.name(),
            "bound report container to task"
        );
        let container = Self {
            container: ReportContainer::new(report_type, instantiator, decorator),
            task,
        };
        Ok((container, project))
    }

    /// The task this container was built for (the same instance, not a copy).
    pub fn task(&self) -> &'t Task {
        self.task
    }

    /// Create a member report, letting the instantiator read defaults from the owning task.
    pub fn create(&mut self, name: &str) -> Result<&mut R, ReportError> {
        let task = self.task;
        self.container.create(name, task)
    }
}

impl<R: Report> Deref for TaskReportContainer<'_, R> {
    type Target = ReportContainer<R>;

    fn deref(&self) -> &Self::Target {
        &self.container
    }
}

impl<R: Report> DerefMut for TaskReportContainer<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.container
    }
}

impl<R: Report> fmt::Debug for TaskReportContainer<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskReportContainer")
            .field("task", &self.task.path())
            .field("container", &self.container)
            .finish()
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::domain::ids::TaskId;
    use crate::domain::report::{OutputType, SimpleReport};
    use crate::impls::{
        DeprecationLogger, DeprecationPolicy, ReportLayout, TracingDecorator, TypedInstantiator,
    };
    use crate::ports::{SystemClock, UlidGenerator};
    use std::path::Path;
    use ulid::Ulid;

    struct Fixture {
        project: Arc<Project>,
        deprecations: Arc<DeprecationLogger>,
    }

    fn instantiator_with(display_name: &'static str) -> Arc<dyn Instantiator> {
        let mut instantiator = TypedInstantiator::new();
        instantiator
            .register::<SimpleReport, _>(move |name, _ctx| {
                Ok(SimpleReport::new(name, display_name, OutputType::File))
            })
            .unwrap();
        Arc::new(instantiator)
    }

    fn bare_project(name: &str) -> Fixture {
        let deprecations = Arc::new(DeprecationLogger::new(DeprecationPolicy::Summary));
        let project = Project::new(
            name,
            "build",
            deprecations.clone(),
            Arc::new(UlidGenerator::new(SystemClock)),
        );
        Fixture {
            project,
            deprecations,
        }
    }

    fn project_with_instantiator(name: &str) -> Fixture {
        let fixture = bare_project(name);
        fixture.project.register_service(instantiator_with("first"));
        fixture
    }

    fn report_type() -> ReportType<SimpleReport> {
        ReportType::of()
    }

    #[test]
    fn new_container_is_empty_and_bound_to_task() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");

        let reports = TaskReportContainer::new(report_type(), &task, noop()).unwrap();

        assert!(reports.is_empty());
        assert!(std::ptr::eq(reports.task(), &task));
        assert_eq!(fx.deprecations.total(), 0);
    }

    #[test]
    fn resolves_instantiator_once_at_construction() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");
        let original = fx.project.service::<dyn Instantiator>().unwrap();

        let mut reports = TaskReportContainer::new(report_type(), &task, noop()).unwrap();
        let replaced = fx.project.register_service(instantiator_with("second"));

        assert!(replaced.is_some());
        assert!(Arc::ptr_eq(reports.instantiator(), &original));
        let report = reports.create("xml").unwrap();
        assert_eq!(report.display_name(), "first");
    }

    #[test]
    fn legacy_constructor_matches_new_and_nags_once() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");

        let current = TaskReportContainer::new(report_type(), &task, noop()).unwrap();
        assert_eq!(fx.deprecations.count(LEGACY_CONSTRUCTOR), 0);

        let legacy = TaskReportContainer::new_legacy(report_type(), &task).unwrap();

        assert_eq!(fx.deprecations.count(LEGACY_CONSTRUCTOR), 1);
        assert_eq!(fx.deprecations.total(), 1);
        assert_eq!(legacy.len(), current.len());
        assert_eq!(legacy.report_type(), current.report_type());
        assert!(Arc::ptr_eq(legacy.instantiator(), current.instantiator()));
        assert!(std::ptr::eq(legacy.task(), current.task()));
    }

    #[test]
    fn legacy_constructor_nags_on_every_call() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");

        TaskReportContainer::new_legacy(report_type(), &task).unwrap();
        TaskReportContainer::new_legacy(report_type(), &task).unwrap();

        assert_eq!(fx.deprecations.count(LEGACY_CONSTRUCTOR), 2);
    }

    #[test]
    fn missing_instantiator_is_a_configuration_error() {
        let fx = bare_project("p2");
        let task = fx.project.create_task("t2");

        let first = TaskReportContainer::new(report_type(), &task, noop()).unwrap_err();
        let second = TaskReportContainer::new(report_type(), &task, noop()).unwrap_err();

        assert!(matches!(
            first,
            ConfigurationError::MissingService { ref project, .. } if project == "p2"
        ));
        assert_eq!(first, second);
    }

    #[test]
    fn failed_legacy_construction_emits_no_notice() {
        let fx = bare_project("p2");
        let task = fx.project.create_task("t2");

        let err = TaskReportContainer::new_legacy(report_type(), &task).unwrap_err();

        assert!(matches!(err, ConfigurationError::MissingService { .. }));
        assert_eq!(fx.deprecations.total(), 0);
    }

    #[test]
    fn task_without_project_is_a_configuration_error() {
        let task = Task::detached(TaskId::from_ulid(Ulid::new()), "orphan");
        let err = TaskReportContainer::new(report_type(), &task, noop()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingProject { .. }));
    }

    #[test]
    fn task_whose_project_was_dropped_is_a_configuration_error() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");
        drop(fx);

        let err = TaskReportContainer::new(report_type(), &task, noop()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingProject {
                task: ":p1:t1".to_string()
            }
        );
    }

    #[test]
    fn create_reads_defaults_from_owning_task() {
        let fx = bare_project("app");
        let mut instantiator = TypedInstantiator::new();
        instantiator
            .register::<SimpleReport, _>(ReportLayout::standard().into_constructor())
            .unwrap();
        let instantiator: Arc<dyn Instantiator> = Arc::new(instantiator);
        fx.project.register_service(instantiator);
        let task = fx.project.create_task("test");

        let decorator = Arc::new(TracingDecorator::new(task.path()));
        let mut reports = TaskReportContainer::new(report_type(), &task, decorator).unwrap();
        reports.create("html").unwrap().set_enabled(true);
        reports.create("xml").unwrap();

        assert_eq!(
            reports.get("html").unwrap().destination(),
            Some(Path::new("build/reports/test/html"))
        );
        assert_eq!(
            reports.get("xml").unwrap().destination(),
            Some(Path::new("build/reports/test/test.xml"))
        );
        assert_eq!(reports.enabled().count(), 1);
    }

    #[test]
    fn several_containers_may_share_a_task() {
        let fx = project_with_instantiator("p1");
        let task = fx.project.create_task("t1");

        let mut first = TaskReportContainer::new(report_type(), &task, noop()).unwrap();
        let second = TaskReportContainer::new(report_type(), &task, noop()).unwrap();
        first.create("xml").unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(std::ptr::eq(first.task(), second.task()));
    }
}

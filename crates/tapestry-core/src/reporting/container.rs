//! ReportContainer - 同じ型のレポートを名前で管理するコレクション
//!
//! # 設計
//! - メンバーは `BTreeMap<String, R>` に名前順で保持
//! - 新しいメンバーは Instantiator で生成（`create`）するか、直接追加（`add`）
//! - add/remove のコールバックは登録時に CallbackDecorator を通す

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::{InstantiationError, ReportError};
use crate::domain::report::{Report, ReportSummary, ReportType};
use crate::ports::{
    CallbackDecorator, Instantiator, InstantiationRequest, MutationCallback, MutationEvent,
    MutationKind, TaskContext,
};

pub struct ReportContainer<R: Report> {
    report_type: ReportType<R>,
    instantiator: Arc<dyn Instantiator>,
    decorator: Arc<dyn CallbackDecorator>,
    reports: BTreeMap<String, R>,
    on_added: Vec<MutationCallback>,
    on_removed: Vec<MutationCallback>,
}

fn fire(callbacks: &[MutationCallback], kind: MutationKind, name: &str) {
    let event = MutationEvent { kind, name };
    for callback in callbacks {
        callback(&event);
    }
}

impl<R: Report> ReportContainer<R> {
    pub fn new(
        report_type: ReportType<R>,
        instantiator: Arc<dyn Instantiator>,
        decorator: Arc<dyn CallbackDecorator>,
    ) -> Self {
        Self {
            report_type,
            instantiator,
            decorator,
            reports: BTreeMap::new(),
            on_added: Vec::new(),
            on_removed: Vec::new(),
        }
    }

    pub fn report_type(&self) -> ReportType<R> {
        self.report_type
    }

    pub fn instantiator(&self) -> &Arc<dyn Instantiator> {
        &self.instantiator
    }

    /// Build a new member with the instantiator and add it.
    pub fn create(&mut self, name: &str, context: &dyn TaskContext) -> Result<&mut R, ReportError> {
        if name.is_empty() {
            return Err(ReportError::InvalidName);
        }
        if self.reports.contains_key(name) {
            return Err(ReportError::DuplicateReport(name.to_string()));
        }

        let request = InstantiationRequest {
            report_type: self.report_type.name(),
            type_id: self.report_type.type_id(),
            name,
            context,
        };
        let report = self
            .instantiator
            .instantiate(&request)?
            .downcast::<R>()
            .map_err(|_| InstantiationError::TypeMismatch {
                expected: self.report_type.name(),
            })?;
        if report.name() != name {
            return Err(InstantiationError::Failed {
                type_name: self.report_type.name(),
                reason: format!("asked for '{name}' but got '{}'", report.name()),
            }
            .into());
        }
        self.add(*report)
    }

    pub fn add(&mut self, report: R) -> Result<&mut R, ReportError> {
        if report.name().is_empty() {
            return Err(ReportError::InvalidName);
        }
        let slot = match self.reports.entry(report.name().to_string()) {
            Entry::Occupied(existing) => {
                return Err(ReportError::DuplicateReport(existing.key().clone()));
            }
            Entry::Vacant(vacant) => vacant.insert(report),
        };
        fire(&self.on_added, MutationKind::Added, slot.name());
        Ok(slot)
    }

    pub fn remove(&mut self, name: &str) -> Option<R> {
        let removed = self.reports.remove(name)?;
        fire(&self.on_removed, MutationKind::Removed, name);
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&R> {
        self.reports.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut R> {
        self.reports.get_mut(name)
    }

    /// Apply `f` to the named report.
    pub fn configure<F>(&mut self, name: &str, f: F) -> Result<&mut R, ReportError>
    where
        F: FnOnce(&mut R),
    {
        let report = self
            .reports
            .get_mut(name)
            .ok_or_else(|| ReportError::UnknownReport(name.to_string()))?;
        f(report);
        Ok(report)
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.reports.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reports.keys().map(String::as_str)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &R> {
        self.reports.values().filter(|r| r.is_enabled())
    }

    pub fn summaries(&self) -> Vec<ReportSummary> {
        self.reports.values().map(Report::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Run `callback` after every future add.
    pub fn when_added<F>(&mut self, callback: F)
    where
        F: Fn(&MutationEvent<'_>) + Send + Sync + 'static,
    {
        let decorated = self.decorator.decorate(Arc::new(callback));
        self.on_added.push(decorated);
    }

    /// Run `callback` after every future remove.
    pub fn when_removed<F>(&mut self, callback: F)
    where
        F: Fn(&MutationEvent<'_>) + Send + Sync + 'static,
    {
        let decorated = self.decorator.decorate(Arc::new(callback));
        self.on_removed.push(decorated);
    }
}

impl<R: Report> fmt::Debug for ReportContainer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportContainer")
            .field("report_type", &self.report_type)
            .field("reports", &self.reports.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::TaskId;
    use crate::domain::report::{OutputType, SimpleReport};
    use crate::domain::{ConfigurationError, Task};
    use crate::impls::TypedInstantiator;
    use crate::ports::noop;
    use std::any::Any;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ulid::Ulid;

    fn instantiator() -> Arc<dyn Instantiator> {
        let mut instantiator = TypedInstantiator::new();
        instantiator
            .register::<SimpleReport, _>(|name, _ctx| {
                Ok(SimpleReport::new(name, name, OutputType::File))
            })
            .unwrap();
        Arc::new(instantiator)
    }

    fn container() -> ReportContainer<SimpleReport> {
        ReportContainer::new(ReportType::of(), instantiator(), noop())
    }

    fn task() -> Task {
        Task::detached(TaskId::from_ulid(Ulid::new()), "test")
    }

    #[test]
    fn starts_empty() {
        let c = container();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert_eq!(c.enabled().count(), 0);
    }

    #[test]
    fn create_uses_instantiator() {
        let mut c = container();
        let task = task();
        let report = c.create("xml", &task).unwrap();
        report.set_enabled(true);

        assert_eq!(c.len(), 1);
        assert!(c.get("xml").unwrap().is_enabled());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut c = container();
        let task = task();
        c.create("xml", &task).unwrap();

        assert_eq!(
            c.create("xml", &task).unwrap_err(),
            ReportError::DuplicateReport("xml".to_string())
        );
        assert_eq!(
            c.add(SimpleReport::new("xml", "again", OutputType::File)).unwrap_err(),
            ReportError::DuplicateReport("xml".to_string())
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut c = container();
        let task = task();
        assert_eq!(c.create("", &task).unwrap_err(), ReportError::InvalidName);
    }

    #[test]
    fn names_and_enabled_follow_name_order() {
        let mut c = container();
        c.add(SimpleReport::new("xml", "XML", OutputType::File).enabled()).unwrap();
        c.add(SimpleReport::new("html", "HTML", OutputType::Directory).enabled()).unwrap();
        c.add(SimpleReport::new("csv", "CSV", OutputType::File)).unwrap();

        assert_eq!(c.names().collect::<Vec<_>>(), vec!["csv", "html", "xml"]);
        let enabled: Vec<&str> = c.enabled().map(|r| r.name()).collect();
        assert_eq!(enabled, vec!["html", "xml"]);
        assert_eq!(c.summaries().len(), 3);
    }

    #[test]
    fn configure_unknown_report_fails() {
        let mut c = container();
        let err = c.configure("pdf", |r| r.set_enabled(true)).unwrap_err();
        assert_eq!(err, ReportError::UnknownReport("pdf".to_string()));
    }

    #[test]
    fn callbacks_see_adds_and_removes() {
        let mut c = container();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let added = seen.clone();
        let removed = seen.clone();
        c.when_added(move |e| added.lock().unwrap().push((e.kind, e.name.to_string())));
        c.when_removed(move |e| removed.lock().unwrap().push((e.kind, e.name.to_string())));

        c.add(SimpleReport::new("html", "HTML", OutputType::Directory)).unwrap();
        assert!(c.remove("html").is_some());
        assert!(c.remove("html").is_none());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (MutationKind::Added, "html".to_string()),
                (MutationKind::Removed, "html".to_string()),
            ]
        );
    }

    struct CountingDecorator {
        decorated: AtomicUsize,
        invoked: Arc<AtomicUsize>,
    }

    impl CallbackDecorator for CountingDecorator {
        fn decorate(&self, callback: MutationCallback) -> MutationCallback {
            self.decorated.fetch_add(1, Ordering::Relaxed);
            let invoked = self.invoked.clone();
            Arc::new(move |event: &MutationEvent<'_>| {
                invoked.fetch_add(1, Ordering::Relaxed);
                callback(event);
            })
        }
    }

    #[test]
    fn decorator_wraps_callbacks_at_registration() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let decorator = Arc::new(CountingDecorator {
            decorated: AtomicUsize::new(0),
            invoked: invoked.clone(),
        });
        let report_type = ReportType::<SimpleReport>::of();
        let mut c = ReportContainer::new(report_type, instantiator(), decorator.clone());

        c.when_added(|_| {});
        c.when_removed(|_| {});
        assert_eq!(decorator.decorated.load(Ordering::Relaxed), 2);

        c.add(SimpleReport::new("html", "HTML", OutputType::Directory)).unwrap();
        c.remove("html");
        assert_eq!(invoked.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn noop_decorator_adds_no_side_effects() {
        let mut c = container();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        c.when_added(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        c.add(SimpleReport::new("html", "HTML", OutputType::Directory)).unwrap();
        let removed = c.remove("html").unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(removed.name(), "html");
        assert!(c.is_empty());
    }

    struct WrongType;

    impl Instantiator for WrongType {
        fn instantiate(
            &self,
            _request: &InstantiationRequest<'_>,
        ) -> Result<Box<dyn Any + Send + Sync>, InstantiationError> {
            Ok(Box::new(42_u32))
        }
    }

    #[test]
    fn wrong_type_from_instantiator_is_reported() {
        let mut c =
            ReportContainer::new(ReportType::<SimpleReport>::of(), Arc::new(WrongType), noop());
        let task = task();
        let err = c.create("xml", &task).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Instantiation(InstantiationError::TypeMismatch { .. })
        ));
        assert!(c.is_empty());
    }

    #[test]
    fn misnamed_report_from_instantiator_is_rejected() {
        let mut instantiator = TypedInstantiator::new();
        instantiator
            .register::<SimpleReport, _>(|_name, _ctx| {
                Ok(SimpleReport::new("other", "Other", OutputType::File))
            })
            .unwrap();
        let report_type = ReportType::<SimpleReport>::of();
        let mut c = ReportContainer::new(report_type, Arc::new(instantiator), noop());
        let task = task();

        assert!(c.create("xml", &task).is_err());
        assert!(c.is_empty());
    }

    #[test]
    fn instantiator_errors_propagate() {
        let mut instantiator = TypedInstantiator::new();
        instantiator
            .register::<SimpleReport, _>(|_name, ctx| {
                let dir = ctx
                    .reports_dir()
                    .map_err(|e: ConfigurationError| InstantiationError::Failed {
                        type_name: "SimpleReport",
                        reason: e.to_string(),
                    })?;
                Ok(SimpleReport::new("html", "HTML", OutputType::Directory).with_destination(dir))
            })
            .unwrap();
        let report_type = ReportType::<SimpleReport>::of();
        let mut c = ReportContainer::new(report_type, Arc::new(instantiator), noop());
        let task = task();

        let err = c.create("html", &task).unwrap_err();
        assert!(matches!(err, ReportError::Instantiation(InstantiationError::Failed { .. })));
    }
}

//! Task-generated reports: `SimpleReport` constructors whose default
//! destination lives under the owning task's reports directory.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::errors::InstantiationError;
use crate::domain::report::{OutputType, SimpleReport};
use crate::ports::TaskContext;

const SIMPLE_REPORT: &str = "SimpleReport";

#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutEntry {
    display_name: String,
    output_type: OutputType,
}

/// The set of report names a build knows how to create, with their output type.
///
/// - directory reports land in `<task reports dir>/<name>`
/// - file reports land in `<task reports dir>/<task name>.<name>`
#[derive(Debug, Clone, Default)]
pub struct ReportLayout {
    entries: BTreeMap<String, LayoutEntry>,
}

impl ReportLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.entries.insert(
            name.into(),
            LayoutEntry {
                display_name: display_name.into(),
                output_type: OutputType::File,
            },
        );
        self
    }

    pub fn directory(mut self, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.entries.insert(
            name.into(),
            LayoutEntry {
                display_name: display_name.into(),
                output_type: OutputType::Directory,
            },
        );
        self
    }

    /// Reports every build knows about: html and junit directories, an xml file.
    pub fn standard() -> Self {
        Self::new()
            .directory("html", "HTML report")
            .directory("junit", "JUnit XML results")
            .file("xml", "XML report")
    }

    pub fn create(
        &self,
        name: &str,
        context: &dyn TaskContext,
    ) -> Result<SimpleReport, InstantiationError> {
        let entry = self.entries.get(name).ok_or_else(|| InstantiationError::Failed {
            type_name: SIMPLE_REPORT,
            reason: format!("no report named '{name}' is known to task {}", context.task_path()),
        })?;
        let reports_dir = context.reports_dir().map_err(|e| InstantiationError::Failed {
            type_name: SIMPLE_REPORT,
            reason: e.to_string(),
        })?;
        let destination = match entry.output_type {
            OutputType::Directory => reports_dir.join(name),
            OutputType::File => reports_dir.join(format!("{}.{name}", context.task_name())),
        };
        Ok(SimpleReport::new(name, entry.display_name.clone(), entry.output_type)
            .with_destination(destination))
    }

    /// Turn the layout into a constructor for `TypedInstantiator::register`.
    pub fn into_constructor(
        self,
    ) -> impl Fn(&str, &dyn TaskContext) -> Result<SimpleReport, InstantiationError>
    + Send
    + Sync
    + 'static {
        let layout = Arc::new(self);
        move |name: &str, context: &dyn TaskContext| layout.create(name, context)
    }
}

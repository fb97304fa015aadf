//! Configure - 設定ファイルの内容をタスクのレポートコンテナに反映する

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::settings::TaskSettings;
use crate::domain::errors::{ConfigurationError, ReportError};
use crate::domain::report::{Report, ReportSummary, ReportType, SimpleReport};
use crate::domain::task::Task;
use crate::ports::CallbackDecorator;
use crate::reporting::TaskReportContainer;

#[derive(Debug, thiserror::Error)]
pub enum ConfigureError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("task '{task}': {source}")]
    Report {
        task: String,
        #[source]
        source: ReportError,
    },
}

/// Which constructor to go through; `Legacy` exists for builds that still call the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructorStyle {
    #[default]
    Current,
    Legacy,
}

/// JSON-friendly view of one task's reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReports {
    pub task: String,
    pub reports: Vec<ReportSummary>,
}

/// Build the task's container and apply every `[tasks.reports.*]` entry.
pub fn configure_reports<'t>(
    task: &'t Task,
    settings: &TaskSettings,
    decorator: Arc<dyn CallbackDecorator>,
    style: ConstructorStyle,
) -> Result<TaskReportContainer<'t, SimpleReport>, ConfigureError> {
    let report_type = ReportType::<SimpleReport>::of();
    let mut reports = match style {
        ConstructorStyle::Current => TaskReportContainer::new(report_type, task, decorator)?,
        #[allow(deprecated)]
        ConstructorStyle::Legacy => TaskReportContainer::new_legacy(report_type, task)?,
    };

    for (name, overrides) in &settings.reports {
        let report = reports.create(name).map_err(|source| ConfigureError::Report {
            task: task.path().to_string(),
            source,
        })?;
        report.set_enabled(overrides.enabled);
        if let Some(destination) = &overrides.destination {
            report.set_destination(destination.clone());
        }
        debug!(
            task = task.path(),
            report = %name,
            enabled = overrides.enabled,
            "configured report"
        );
    }
    Ok(reports)
}

pub fn summarize(reports: &TaskReportContainer<'_, SimpleReport>) -> TaskReports {
    TaskReports {
        task: reports.task().path().to_string(),
        reports: reports.summaries(),
    }
}

//! Report model: named output artifacts a task may produce.
//!
//! This module only defines the shape of a report (name, enabled flag,
//! destination). Rendering and writing reports is left to whoever runs the
//! task.

use std::any::{self, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Whether a report is written to a single file or a directory of files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputType {
    File,
    Directory,
}

/// Report は container のメンバーが満たすべき trait
///
/// # Trait Bounds
/// - `Send + Sync`: Instantiator が `Box<dyn Any + Send + Sync>` で返すため
/// - `'static`: `TypeId` で型を照合するため
pub trait Report: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn display_name(&self) -> &str {
        self.name()
    }

    fn output_type(&self) -> OutputType;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn destination(&self) -> Option<&Path>;

    fn set_destination(&mut self, destination: PathBuf);

    fn summary(&self) -> ReportSummary {
        ReportSummary {
            name: self.name().to_string(),
            display_name: self.display_name().to_string(),
            output_type: self.output_type(),
            enabled: self.is_enabled(),
            destination: self.destination().map(Path::to_path_buf),
        }
    }
}

/// Serializable snapshot of a report's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub name: String,
    pub display_name: String,
    pub output_type: OutputType,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
}

/// A plain report: enabled flag plus an optional destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleReport {
    name: String,
    display_name: String,
    output_type: OutputType,
    enabled: bool,
    destination: Option<PathBuf>,
}

impl SimpleReport {
    /// Reports start disabled, matching how a task opts in to each one.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        output_type: OutputType,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            output_type,
            enabled: false,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }
}

impl Report for SimpleReport {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn output_type(&self) -> OutputType {
        self.output_type
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    fn set_destination(&mut self, destination: PathBuf) {
        self.destination = Some(destination);
    }
}

/// ReportType は container の型上限（upper bound）を値として運ぶ記述子
///
/// `PhantomData<fn() -> R>` なので `R` を所有せず、常に `Copy` です。
pub struct ReportType<R: Report> {
    _marker: PhantomData<fn() -> R>,
}

impl<R: Report> ReportType<R> {
    pub fn of() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        any::type_name::<R>()
    }

    pub fn type_id(&self) -> TypeId {
        TypeId::of::<R>()
    }
}

impl<R: Report> Clone for ReportType<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Report> Copy for ReportType<R> {}

impl<R: Report> PartialEq for ReportType<R> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<R: Report> Eq for ReportType<R> {}

impl<R: Report> fmt::Debug for ReportType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReportType").field(&self.name()).finish()
    }
}

impl<R: Report> Default for ReportType<R> {
    fn default() -> Self {
        Self::of()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_report_starts_disabled_without_destination() {
        let report = SimpleReport::new("html", "HTML report", OutputType::Directory);
        assert!(!report.is_enabled());
        assert!(report.destination().is_none());
        assert_eq!(report.display_name(), "HTML report");
    }

    #[test]
    fn summary_reflects_configuration() {
        let mut report = SimpleReport::new("xml", "XML report", OutputType::File);
        report.set_enabled(true);
        report.set_destination(PathBuf::from("build/reports/test/xml.xml"));

        let summary = report.summary();
        assert!(summary.enabled);
        assert_eq!(summary.output_type, OutputType::File);
        assert_eq!(
            summary.destination.as_deref(),
            Some(Path::new("build/reports/test/xml.xml"))
        );
    }

    #[test]
    fn output_type_serializes_as_screaming_snake_case() {
        let s = serde_json::to_string(&OutputType::Directory).unwrap();
        assert_eq!(s, "\"DIRECTORY\"");
    }

    #[test]
    fn report_type_names_its_bound() {
        let report_type = ReportType::<SimpleReport>::of();
        assert!(report_type.name().ends_with("SimpleReport"));
        assert_eq!(report_type.type_id(), TypeId::of::<SimpleReport>());
    }
}

//! Domain model (IDs, projects, tasks, reports, errors).
//!
//! - ids: ULID ベースの ProjectId / TaskId
//! - project / task: サービスを持つ Project と、それに属する Task
//! - services: capability 型をキーにしたサービス登録簿
//! - report: Report trait と SimpleReport
//! - errors: ConfigurationError などのエラー型

pub mod ids;
pub mod errors;
pub mod services;
pub mod project;
pub mod task;
pub mod report;

pub use self::ids::{ProjectId, TaskId};
pub use self::errors::{ConfigurationError, DeprecationError, InstantiationError, ReportError};
pub use self::services::ServiceRegistry;
pub use self::project::{DEFAULT_REPORTS_DIR_NAME, Project};
pub use self::task::Task;
pub use self::report::{OutputType, Report, ReportSummary, ReportType, SimpleReport};

//! Reporting - タスクのレポートコンテナ
//!
//! # 二層構造
//! - **ReportContainer<R>**: 型付きレポートの汎用コレクション（生成・追加・削除・コールバック）
//! - **TaskReportContainer<'t, R>**: 所有タスクに紐づけ、Instantiator をタスクの Project から解決する

pub mod container;
pub mod task_container;

pub use self::container::ReportContainer;
pub use self::task_container::{LEGACY_CONSTRUCTOR, TaskReportContainer};

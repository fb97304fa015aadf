//! TaskContext port - レポート生成時に参照できるタスク文脈
//!
//! 既定の出力先などを決めるために、ファクトリはこの trait 経由で
//! container を所有するタスクを参照します。

use std::path::PathBuf;

use crate::domain::errors::ConfigurationError;
use crate::domain::ids::TaskId;

pub trait TaskContext {
    fn task_id(&self) -> TaskId;

    fn task_name(&self) -> &str;

    /// Fully qualified path, e.g. `:app:test`.
    fn task_path(&self) -> String;

    /// Default directory for this task's reports.
    fn reports_dir(&self) -> Result<PathBuf, ConfigurationError>;
}

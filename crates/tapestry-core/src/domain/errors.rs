//! Errors - エラー型と分類
//!
//! # 分類
//! - **ConfigurationError**: Task / Project の結線ミス（構築時に即失敗、リトライしない）
//! - **ReportError**: コンテナ操作のエラー（名前重複、未登録など）
//! - **InstantiationError**: Instantiator がレポートを生成できない
//! - **DeprecationError**: 非推奨ポリシーが `fail` のときのビルド終了時エラー

use thiserror::Error;

/// ConfigurationError は Task が正しい Project 文脈の外で使われたことを示す
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("task '{task}' is not attached to a project")]
    MissingProject { task: String },

    #[error("project '{project}' has no registered service of type {service}")]
    MissingService {
        project: String,
        service: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationError {
    #[error("no constructor registered for report type {type_name}")]
    UnknownType { type_name: &'static str },

    #[error("constructor for {expected} produced a value of a different type")]
    TypeMismatch { expected: &'static str },

    #[error("could not create {type_name}: {reason}")]
    Failed {
        type_name: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("report name must not be empty")]
    InvalidName,

    #[error("report '{0}' already exists in this container")]
    DuplicateReport(String),

    #[error("report '{0}' not found")]
    UnknownReport(String),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("build used {count} deprecated feature(s): {identifiers:?}")]
pub struct DeprecationError {
    pub count: usize,
    pub identifiers: Vec<String>,
}

//! Instantiator port - レポート生成サービスの抽象化
//!
//! Project のサービスとして登録され、TaskReportContainer が構築時に一度だけ解決します。
//! 生成結果は型消去された `Box<dyn Any>` で返し、container 側で downcast します。

use std::any::{Any, TypeId};

use crate::domain::errors::InstantiationError;
use crate::ports::TaskContext;

/// What the container asks the instantiator to build.
pub struct InstantiationRequest<'a> {
    pub report_type: &'static str,
    pub type_id: TypeId,
    pub name: &'a str,
    pub context: &'a dyn TaskContext,
}

/// Instantiator は任意のレポート型を生成するファクトリ
///
/// # Object Safety
/// - ジェネリックメソッドを持たないので `Arc<dyn Instantiator>` として登録できる
/// - 型の指定は `InstantiationRequest::type_id` で行う
pub trait Instantiator: Send + Sync {
    fn instantiate(
        &self,
        request: &InstantiationRequest<'_>,
    ) -> Result<Box<dyn Any + Send + Sync>, InstantiationError>;
}

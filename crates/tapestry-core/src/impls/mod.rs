//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **TypedInstantiator**: 型ごとのコンストラクタを持つ Instantiator
//! - **ReportLayout**: タスクの reports ディレクトリを既定の出力先にする SimpleReport 生成
//! - **TracingDecorator**: 変更を tracing に流す CallbackDecorator
//! - **DeprecationLogger**: ポリシー付きの DeprecationSink

pub mod typed_instantiator;
pub mod reports;
pub mod tracing_decorator;
pub mod deprecation_logger;

// 主要な型を再エクスポート
pub use self::typed_instantiator::{RegistryError, TypedInstantiator};
pub use self::reports::ReportLayout;
pub use self::tracing_decorator::TracingDecorator;
pub use self::deprecation_logger::{DeprecationLogger, DeprecationNotice, DeprecationPolicy};

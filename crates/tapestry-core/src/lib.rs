//! tapestry-core
//!
//! タスクごとのレポートコンテナと、それを支える Project / サービス登録の仕組み。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, project, task, services, report, errors）
//! - **ports**: 抽象化レイヤー（Instantiator, CallbackDecorator, DeprecationSink, TaskContext, Clock, IdGenerator）
//! - **impls**: 実装（TypedInstantiator, ReportLayout, TracingDecorator, DeprecationLogger）
//! - **reporting**: ReportContainer と TaskReportContainer
//! - **app**: ProjectBuilder, BuildSettings, 設定の反映

pub mod domain;
pub mod ports;
pub mod impls;
pub mod reporting;
pub mod app;

//! App - アプリケーション層
//!
//! このモジュールは、ports と reporting を組み合わせてビルドを組み立てます。
//!
//! # 主要コンポーネント
//! - **ProjectBuilder**: Project の構築とサービスのワイヤリング
//! - **BuildSettings**: TOML の設定ファイル
//! - **configure_reports**: 設定をタスクのレポートコンテナに反映

pub mod builder;
pub mod settings;
pub mod configure;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, ProjectBuilder};
pub use self::settings::{BuildSettings, ReportSettings, SettingsError, TaskSettings};
pub use self::configure::{
    ConfigureError, ConstructorStyle, TaskReports, configure_reports, summarize,
};

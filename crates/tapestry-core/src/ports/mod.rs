//! Ports - 抽象化レイヤー
//!
//! 各 trait は core と外部の協調者（レポート生成、コールバック装飾、
//! 非推奨通知、時刻、ID）の境界を表します。実装は `impls` にあります。

pub mod instantiator;
pub mod callback;
pub mod deprecation;
pub mod context;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::instantiator::{Instantiator, InstantiationRequest};
pub use self::callback::{
    CallbackDecorator, MutationCallback, MutationEvent, MutationKind, NoopDecorator, noop,
};
pub use self::deprecation::DeprecationSink;
pub use self::context::TaskContext;
pub use self::clock::{Clock, SystemClock, FixedClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};

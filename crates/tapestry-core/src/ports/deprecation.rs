//! DeprecationSink port - 非推奨 API 利用の通知チャネル
//!
//! 警告・一度だけ警告・ビルド失敗への格上げなどのポリシーは実装側が持ちます。
//! 呼び出し側は `nag_user_of` を呼ぶだけで、ここで処理が中断されることはありません。

/// DeprecationSink は非推奨 API の識別子を受け取って記録する
///
/// # 識別子
/// - 人間が読めて、かつ安定した文字列（例: 非推奨シグネチャそのもの）
/// - 重複排除や allow-list のキーとして使われる
pub trait DeprecationSink: Send + Sync {
    fn nag_user_of(&self, identifier: &str);
}

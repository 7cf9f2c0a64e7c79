//! モデル定義
//!
//! provflowのシナリオ設定ファイルが表現するデータモデルを定義します。
//! 各モデルはエンティティごとにモジュールに分離されています。

mod driver;
mod lint;
mod plan;
mod platform;
mod provisioner;
mod scenario;
mod verifier;

// Re-exports
pub use driver::*;
pub use lint::*;
pub use plan::*;
pub use platform::*;
pub use provisioner::*;
pub use scenario::*;
pub use verifier::*;

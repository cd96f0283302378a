//! # mvu-link
//!
//! アクセラレータとの双方向バイトチャンネル抽象化レイヤー。
//!
//! コアプロトコル（`mvu-frame` / `mvu-session`）は物理トランスポートを
//! 知らない。必要なのは「バイト列を書く」「1 グループ読む」「未読を捨てる」
//! の 3 操作だけで、それを `ByteStream` トレイトとして切り出している。
//!
//! ## 実装
//!
//! - [`SerialLink`]: serialport クレートによる実 UART（偶数パリティ /
//!   8 データビット / 1 ストップビット）。ポートは Drop で必ず解放される。
//! - [`LoopbackLink`]: インメモリのテストダブル。レスポンスを台本として
//!   積んでおき、書き込まれたバイトを記録する。
//!
//! ## リソース規律
//!
//! ポートはスコープ所有で獲得し、すべての脱出経路（パニック・割り込みに
//! よる unwinding を含む）で Drop により解放される。シグナルハンドラや
//! プロセス全域のシングルトンは存在しない。

pub mod config;
pub mod error;
pub mod loopback;
pub mod serial;
pub mod stream;

pub use config::LinkConfig;
pub use error::LinkError;
pub use loopback::LoopbackLink;
pub use serial::SerialLink;
pub use stream::ByteStream;

/// デフォルトボーレート
pub const DEFAULT_BAUD: u32 = 9600;

/// 高速ボーレート（配線品質が確認できた環境向け）
pub const FAST_BAUD: u32 = 921_600;

/// 読み出しタイムアウトのデフォルト（ミリ秒）
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1_000;

/// ポートオープン後の安定化待ち（ミリ秒）
///
/// 接続直後は電気的に不安定なため、最初の送信前に必ず待つ。
pub const OPEN_SETTLE_DELAY_MS: u64 = 2_000;

/// バイト間ペーシング遅延のデフォルト（ミリ秒）
///
/// アクセラレータの取り込みレートを超えて送るとバイトが落ちる。
/// 正しさの要件であって最適化ではない。
pub const INTER_BYTE_DELAY_MS: u64 = 10;

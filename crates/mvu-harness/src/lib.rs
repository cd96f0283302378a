//! # mvu-harness
//!
//! ランダム化された正しさ/レイテンシ試験のハーネス。
//!
//! トライアルごとに新しいオペランド（ベクトルと行列）を一様乱数で生成し、
//! ソフトウェアの正確な整数積で参照結果を計算してから `mvu-session` 経由で
//! アクセラレータに同じ計算をさせる。返ってきた結果ベクトルを要素ごとに
//! 比較し、正答数とホスト/デバイス両系のレイテンシを集計する。
//!
//! ## トライアル間の規律
//!
//! - 各トライアルの前に `Session::reset()` で未読バイトを捨てる
//! - 固定の安定化待ちを挟み、アクセラレータをアイドル状態に戻す
//! - タイムアウトしたトライアルは不正解として数え、リトライせず続行する
//!
//! ## オペランドの範囲
//!
//! 結果スロットは 1 ニブルしかないため、参照結果がそこに収まる範囲で
//! オペランドを生成しないと比較が成立しない。デフォルトの上限は
//! `max_operand_for` が次元から導く。

pub mod config;
pub mod reference;
pub mod runner;
pub mod stats;

pub use config::{max_operand_for, HarnessConfig};
pub use reference::reference_product;
pub use runner::Harness;
pub use stats::RunStatistics;

/// トライアル間の安定化待ちデフォルト（ミリ秒）
pub const INTER_TRIAL_SETTLE_MS: u64 = 500;

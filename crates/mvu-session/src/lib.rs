//! # mvu-session
//!
//! アクセラレータとの 1 リクエスト/レスポンス交換のオーケストレーション。
//!
//! ## 交換の流れ
//!
//! ```text
//! 1. t0 記録（最初のバイト書き込み直前）
//! 2. RequestFrame をエンコード（検証エラーは送信前に中断）
//! 3. 1 バイトずつペーシング遅延を挟んで送信
//! 4. t1 記録（最後のバイト送出直後 = デバイス計測の基準点）
//! 5. グループ単位でレスポンスを読み、結果ベクトルを組み立てる
//! 6. 完成時に t2 記録、Exchange を返す
//! ```
//!
//! デバイス計測レイテンシ = t2 - t1、ホスト計測レイテンシ = t2 - t0。
//!
//! ## 破損とタイムアウト
//!
//! 範囲外インデックスのグループは警告ログを出して読み続ける
//! （散発ノイズへの耐性を優先するポリシー）。タイムアウト時は
//! 未充填のインデックス一覧を添えて失敗する。

pub mod error;
pub mod session;
pub mod timing;

pub use error::SessionError;
pub use session::{Exchange, Session};
pub use timing::TimingRecord;

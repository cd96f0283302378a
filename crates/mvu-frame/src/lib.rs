//! # mvu-frame
//!
//! MVU (Matrix-Vector Unit) アクセラレータリンクの Wire Format 実装。
//!
//! UART 上のリクエスト（オペランド送信）とレスポンス（結果受信）の
//! バイト列エンコード/デコードを担当する。物理トランスポートは
//! `mvu-link`、送受信のタイミング管理は `mvu-session` が担当する。
//!
//! ## リクエストの Wire Format
//!
//! ```text
//! [vector: N bytes 自然順][matrix: N*N bytes 転置順（列優先）][zero padding]
//!                                                             ↑ 全長が WIRE_GROUP_LEN の倍数になるまで
//! ```
//!
//! 行列はホスト側では行優先で保持するが、アクセラレータは列優先入力を
//! 期待するため **転置順で送信する**。これはプロトコル不変条件であって
//! 実装の都合ではない。
//!
//! ## レスポンスの Wire Format
//!
//! ```text
//! [group: 4 bytes] [group: 4 bytes] ...
//!
//! 各グループの先頭バイト:
//!   bit 4..7 (上位ニブル) = 結果スロットのインデックス
//!   bit 0..3 (下位ニブル) = 結果スロットの値
//! 残り 3 バイトはアクセラレータ定義の同期/パディング（保持するが解釈しない）
//! ```
//!
//! グループは順不同で届く。N 個のインデックスがすべて揃った時点で
//! 結果ベクトルが完成する。

#![no_std]
extern crate alloc;

pub mod assembly;
pub mod error;
pub mod request;
pub mod response;

pub use assembly::{ResultAssembly, SlotOutcome};
pub use error::FrameError;
pub use request::RequestFrame;
pub use response::ResponseGroup;

/// シリアル送受信の最小単位（バイト数）
///
/// 書き込みは常にこの倍数で行い、読み出しも常にこの単位でブロックする。
/// ハードウェア契約であり変更不可。
pub const WIRE_GROUP_LEN: usize = 4;

/// 結果インデックスのビット幅
///
/// レスポンスバイトの上位ニブルに格納されるため 4 ビット固定。
pub const INDEX_BITS: u32 = 4;

/// 扱える最大次元数（インデックスが 1 ニブルに収まる上限）
pub const MAX_DIM: usize = 1 << INDEX_BITS;

/// Wire 上のオペランドは 1 バイト。これを超える値は拒否する（クランプしない）
pub const OPERAND_MAX: u16 = 0xFF;

/// 結果スロットの値は 1 ニブル
pub const SLOT_VALUE_MAX: u8 = 0x0F;

/// ホスト側オペランド型
///
/// Wire 上は 1 バイトだが、範囲検証を encode 境界で行うため
/// ホスト側では余裕のある幅で持つ。
pub type Operand = u16;

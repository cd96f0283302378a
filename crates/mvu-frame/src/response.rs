//! レスポンスグループの解釈
//!
//! ## Wire Format
//! ```text
//! [slot: 1 byte][sync/padding: 3 bytes]
//!
//! slot バイト:
//!   bit 4..7 (上位ニブル) = 結果スロットのインデックス
//!   bit 0..3 (下位ニブル) = 結果スロットの値
//! ```

use crate::{INDEX_BITS, SLOT_VALUE_MAX, WIRE_GROUP_LEN};

/// レスポンスストリームの 1 グループ（4 バイト固定）
///
/// 先頭バイトのみが結果データを運ぶ。残り 3 バイトは
/// アクセラレータ定義の同期/パディングで、`raw()` でそのまま
/// 保持されるが解釈はしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseGroup {
    raw: [u8; WIRE_GROUP_LEN],
}

impl ResponseGroup {
    /// 受信した 1 グループからレスポンスグループを構築する
    pub fn from_group(raw: [u8; WIRE_GROUP_LEN]) -> Self {
        ResponseGroup { raw }
    }

    /// 結果スロットのインデックス（上位ニブル）
    ///
    /// 0..=15 の値。次元 N に対する範囲検証は `ResultAssembly` が行う。
    pub fn slot_index(&self) -> usize {
        (self.raw[0] >> INDEX_BITS) as usize
    }

    /// 結果スロットの値（下位ニブル）
    pub fn slot_value(&self) -> u8 {
        self.raw[0] & SLOT_VALUE_MAX
    }

    /// グループの生バイト列（同期/パディングバイトを含む）
    pub fn raw(&self) -> &[u8; WIRE_GROUP_LEN] {
        &self.raw
    }
}

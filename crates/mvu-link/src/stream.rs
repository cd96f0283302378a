//! 双方向バイトチャンネルのトレイト定義

use mvu_frame::WIRE_GROUP_LEN;

use crate::error::LinkError;

/// アクセラレータとの双方向バイトチャンネル
///
/// コアプロトコルが要求する操作はこの 3 つだけ。ボーレートや
/// パリティなどの物理設定は実装側（`SerialLink`）の責任で、
/// トレイトには現れない。
///
/// クローズ操作は持たない: 実装は Drop でリソースを解放する
/// （スコープ所有、すべての脱出経路で保証される）。
pub trait ByteStream {
    /// バイト列を書き込む
    ///
    /// ペーシング（バイト間遅延）は呼び出し側（`mvu-session`）が
    /// 1 バイトずつの write で制御する。
    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError>;

    /// 1 グループ（`WIRE_GROUP_LEN` バイト）を読む
    ///
    /// 設定されたタイムアウトまでブロックする。
    ///
    /// # エラー
    /// - `LinkError::ReadTimeout`: タイムアウト内にグループが揃わなかった
    fn read_group(&mut self) -> Result<[u8; WIRE_GROUP_LEN], LinkError>;

    /// バッファ済みで未読のバイトをすべて破棄する
    ///
    /// 前回の不完全・破損レスポンスが次の交換を汚染しないよう、
    /// 交換開始前に必ず呼ぶ。
    fn discard_input(&mut self) -> Result<(), LinkError>;
}

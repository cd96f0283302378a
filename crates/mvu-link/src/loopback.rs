//! インメモリのテストダブルリンク
//!
//! 実ハードウェアなしで `mvu-session` / `mvu-harness` を動かすための
//! 台本方式のバイトチャンネル。レスポンスバイトを事前に積んでおき、
//! 書き込まれたバイトをすべて記録する。

use std::collections::VecDeque;

use mvu_frame::WIRE_GROUP_LEN;

use crate::error::LinkError;
use crate::stream::ByteStream;

/// 台本方式のインメモリリンク
///
/// - `queue_response` で積んだバイトが `read_group` から順に返る
/// - 台本が尽きる（1 グループに満たない）と `ReadTimeout` を返す
/// - 書き込みは `written` に蓄積され、テストが送信内容を検証できる
pub struct LoopbackLink {
    /// read_group が消費する台本バイト列
    incoming: VecDeque<u8>,
    /// 記録された送信バイト列
    written: Vec<u8>,
    /// 送信された総バイト数（統計用）
    total_sent: u64,
    /// 受信された総バイト数（統計用）
    total_received: u64,
}

impl LoopbackLink {
    /// 空のループバックリンクを生成する
    pub fn new() -> Self {
        LoopbackLink {
            incoming: VecDeque::new(),
            written: Vec::new(),
            total_sent: 0,
            total_received: 0,
        }
    }

    /// レスポンス台本にバイト列を積む
    pub fn queue_response(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().copied());
    }

    /// レスポンス台本に 1 グループ（スロットバイト + パディング 3 バイト）を積む
    ///
    /// # 引数
    /// - `index`: 結果スロットのインデックス（上位ニブルへ）
    /// - `value`: 結果スロットの値（下位ニブルへ）
    pub fn queue_slot(&mut self, index: u8, value: u8) {
        self.queue_response(&[(index << 4) | (value & 0x0F), 0, 0, 0]);
    }

    /// これまでに書き込まれた全バイト列
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// 未読の台本バイト数
    pub fn pending_len(&self) -> usize {
        self.incoming.len()
    }

    /// 送信された総バイト数（統計用）
    pub fn total_sent_bytes(&self) -> u64 {
        self.total_sent
    }

    /// 受信された総バイト数（統計用）
    pub fn total_received_bytes(&self) -> u64 {
        self.total_received
    }
}

impl Default for LoopbackLink {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteStream for LoopbackLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.written.extend_from_slice(bytes);
        self.total_sent += bytes.len() as u64;
        Ok(())
    }

    fn read_group(&mut self) -> Result<[u8; WIRE_GROUP_LEN], LinkError> {
        if self.incoming.len() < WIRE_GROUP_LEN {
            // 台本切れ = タイムアウト扱い
            return Err(LinkError::ReadTimeout { received: self.incoming.len() });
        }
        let mut group = [0u8; WIRE_GROUP_LEN];
        for byte in group.iter_mut() {
            *byte = self.incoming.pop_front().unwrap();
        }
        self.total_received += WIRE_GROUP_LEN as u64;
        Ok(group)
    }

    fn discard_input(&mut self) -> Result<(), LinkError> {
        self.incoming.clear();
        Ok(())
    }
}

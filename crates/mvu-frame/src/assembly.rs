//! 結果ベクトルの再組み立て
//!
//! レスポンスグループは順不同で届く。グループごとにスロットを埋め、
//! N 個のインデックスがすべて観測された時点で結果ベクトルが完成する。
//! 範囲外インデックスは破損として数えるが、組み立ては中断しない。

use alloc::vec;
use alloc::vec::Vec;

use crate::error::FrameError;
use crate::response::ResponseGroup;
use crate::MAX_DIM;

/// 1 グループを取り込んだ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// 有効なスロットが書き込まれた
    Filled {
        /// 書き込まれたスロットのインデックス
        index: usize,
        /// 書き込まれた値
        value: u8,
        /// 既に埋まっていたスロットへの上書きだったか
        overwrote: bool,
    },
    /// インデックスが次元 N を超えていた（スロットは変更されない）
    Corrupted {
        /// 観測した範囲外インデックス
        index: usize,
    },
}

/// レスポンスグループを受け取り、結果ベクトルに再組み立てするクラス
///
/// 組み立て中の状態は 1 回の交換のデコードループが排他的に所有し、
/// 完成した不変の結果ベクトルだけを `into_result` で呼び出し側へ渡す。
///
/// ## ポリシー
/// - 重複インデックスは **後勝ち**（最後に届いた値で上書きする）
/// - 範囲外インデックスは破損として数え、以前の値を保持して続行する
pub struct ResultAssembly {
    /// インデックス → 値の固定長マッピング（None = 未充填）
    slots: Vec<Option<u8>>,
    /// 観測した破損グループ数（診断用）
    corrupted: u64,
}

impl ResultAssembly {
    /// 次元 N の組み立て器を生成する
    ///
    /// # エラー
    /// - `FrameError::InvalidDimension`: N == 0 または N > MAX_DIM
    pub fn new(dim: usize) -> Result<Self, FrameError> {
        if dim == 0 || dim > MAX_DIM {
            return Err(FrameError::InvalidDimension { expected: MAX_DIM, actual: dim });
        }
        Ok(ResultAssembly { slots: vec![None; dim], corrupted: 0 })
    }

    /// 受信した 1 グループを取り込む
    ///
    /// # 戻り値
    /// - `SlotOutcome::Filled`: スロットが書き込まれた（上書き含む）
    /// - `SlotOutcome::Corrupted`: 範囲外インデックス。状態は変更されない
    pub fn push_group(&mut self, group: &ResponseGroup) -> SlotOutcome {
        let index = group.slot_index();
        if index >= self.slots.len() {
            self.corrupted += 1;
            return SlotOutcome::Corrupted { index };
        }

        let value = group.slot_value();
        let overwrote = self.slots[index].is_some();
        self.slots[index] = Some(value);
        SlotOutcome::Filled { index, value, overwrote }
    }

    /// すべてのスロットが少なくとも一度埋まったか
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// まだ埋まっていないスロットのインデックス（タイムアウト診断用）
    pub fn missing_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// 次元 N
    pub fn dim(&self) -> usize {
        self.slots.len()
    }

    /// 観測した破損グループ数
    pub fn corrupted_groups(&self) -> u64 {
        self.corrupted
    }

    /// 完成していれば結果ベクトルを返す
    ///
    /// # 戻り値
    /// - `Some(Vec<u8>)`: 全スロットが埋まった結果ベクトル
    /// - `None`: 未完成（組み立て器は消費される）
    pub fn into_result(self) -> Option<Vec<u8>> {
        self.slots.into_iter().collect()
    }
}

//! ハーネス設定

use std::time::Duration;

use mvu_frame::{Operand, SLOT_VALUE_MAX};

use crate::INTER_TRIAL_SETTLE_MS;

/// 次元 N に対して参照結果が 1 ニブルに収まる最大オペランド値
///
/// 最悪ケースの内積は N * m * m（全要素が m のとき）。これが
/// `SLOT_VALUE_MAX` (15) を超えない最大の m を返す。
///
/// 例: N=1 → 3, N=2 → 2, N=4 → 1, N=16 → 0
pub fn max_operand_for(dim: usize) -> Operand {
    let mut m: usize = 0;
    while dim * (m + 1) * (m + 1) <= SLOT_VALUE_MAX as usize {
        m += 1;
    }
    m as Operand
}

/// 試験ランの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// 次元 N
    pub dim: usize,
    /// トライアル数
    pub trials: u32,
    /// 生成するオペランドの上限（0..=operand_max の一様乱数）
    pub operand_max: Operand,
    /// トライアル間の安定化待ち
    pub settle_delay: Duration,
}

impl HarnessConfig {
    /// 次元とトライアル数から設定を生成する
    ///
    /// オペランド上限は `max_operand_for(dim)`、安定化待ちは
    /// デフォルト値になる。
    pub fn new(dim: usize, trials: u32) -> Self {
        HarnessConfig {
            dim,
            trials,
            operand_max: max_operand_for(dim),
            settle_delay: Duration::from_millis(INTER_TRIAL_SETTLE_MS),
        }
    }

    /// オペランド上限を変更する
    pub fn with_operand_max(mut self, operand_max: Operand) -> Self {
        self.operand_max = operand_max;
        self
    }

    /// 安定化待ちを変更する（loopback テストではゼロにする）
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_operand_keeps_product_in_nibble() {
        assert_eq!(max_operand_for(1), 3); // 1*3*3 = 9 <= 15, 1*4*4 = 16 > 15
        assert_eq!(max_operand_for(2), 2); // 2*2*2 = 8 <= 15, 2*3*3 = 18 > 15
        assert_eq!(max_operand_for(4), 1); // 4*1*1 = 4 <= 15, 4*2*2 = 16 > 15
        assert_eq!(max_operand_for(16), 0); // 16*1*1 = 16 > 15
    }

    #[test]
    fn test_worst_case_product_bound() {
        for dim in 1..=16usize {
            let m = max_operand_for(dim) as usize;
            assert!(dim * m * m <= SLOT_VALUE_MAX as usize);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = HarnessConfig::new(2, 10);
        assert_eq!(config.operand_max, 2);
        assert_eq!(config.settle_delay, Duration::from_millis(500));
    }
}

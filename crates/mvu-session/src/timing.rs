//! 交換のタイミング記録
//!
//! ホスト側オーバーヘッドとデバイス側計算レイテンシを分離して
//! 計測するため、3 つの時刻を保持する。

use std::time::{Duration, Instant};

/// ちょうど 1 交換にまたがるタイミング記録
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    /// t0: 最初のバイト書き込み直前
    pub issued_at: Instant,
    /// t1: 最後のバイト送出直後（デバイス計測の基準点）
    pub flushed_at: Instant,
    /// t2: レスポンス完成時
    pub completed_at: Instant,
}

impl TimingRecord {
    /// デバイス計測レイテンシ: t2 - t1
    ///
    /// 送信ペーシングのコストを含まない、アクセラレータの
    /// 計算 + 応答送出にかかった時間。
    pub fn device_elapsed(&self) -> Duration {
        self.completed_at.duration_since(self.flushed_at)
    }

    /// ホスト計測レイテンシ: t2 - t0
    ///
    /// ペーシング込みの、呼び出し全体にかかった時間。
    pub fn host_elapsed(&self) -> Duration {
        self.completed_at.duration_since(self.issued_at)
    }

    /// 送信（ペーシング込み）にかかった時間: t1 - t0
    pub fn transmit_elapsed(&self) -> Duration {
        self.flushed_at.duration_since(self.issued_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_derivation() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(30);
        let t2 = t1 + Duration::from_millis(5);
        let record = TimingRecord { issued_at: t0, flushed_at: t1, completed_at: t2 };

        assert_eq!(record.transmit_elapsed(), Duration::from_millis(30));
        assert_eq!(record.device_elapsed(), Duration::from_millis(5));
        assert_eq!(record.host_elapsed(), Duration::from_millis(35));
    }
}

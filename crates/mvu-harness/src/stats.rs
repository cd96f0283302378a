//! 試験ランの集計統計

use std::time::Duration;

use serde::Serialize;

/// 1 ランの集計統計（JSON 出力用に Serialize）
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStatistics {
    /// 実行したトライアル数
    pub trials: u32,
    /// 参照結果と完全一致したトライアル数
    pub correct: u32,
    /// タイムアウトで失敗したトライアル数（不正解に含まれる）
    pub timeouts: u32,
    /// 全トライアルで観測した破損グループ総数
    pub corrupted_groups: u64,
    /// ホスト計測レイテンシ累計（ミリ秒）
    pub total_host_ms: f64,
    /// デバイス計測レイテンシ累計（ミリ秒）
    pub total_device_ms: f64,
}

impl RunStatistics {
    /// 完了したトライアルを 1 件集計する
    pub fn record_exchange(
        &mut self,
        correct: bool,
        host_elapsed: Duration,
        device_elapsed: Duration,
        corrupted_groups: u64,
    ) {
        self.trials += 1;
        if correct {
            self.correct += 1;
        }
        self.corrupted_groups += corrupted_groups;
        self.total_host_ms += host_elapsed.as_secs_f64() * 1_000.0;
        self.total_device_ms += device_elapsed.as_secs_f64() * 1_000.0;
    }

    /// タイムアウトしたトライアルを 1 件集計する（不正解扱い）
    pub fn record_timeout(&mut self) {
        self.trials += 1;
        self.timeouts += 1;
    }

    /// 正答率（0.0..=1.0）。トライアルゼロなら 0.0
    pub fn accuracy(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.trials)
    }

    /// 完了トライアルあたりの平均ホストレイテンシ（ミリ秒）
    pub fn avg_host_ms(&self) -> f64 {
        let completed = self.trials - self.timeouts;
        if completed == 0 {
            return 0.0;
        }
        self.total_host_ms / f64::from(completed)
    }

    /// 完了トライアルあたりの平均デバイスレイテンシ（ミリ秒）
    pub fn avg_device_ms(&self) -> f64 {
        let completed = self.trials - self.timeouts;
        if completed == 0 {
            return 0.0;
        }
        self.total_device_ms / f64::from(completed)
    }
}

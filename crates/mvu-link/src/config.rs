//! リンク設定
//!
//! ポート名を含むすべての設定は明示的に渡す。プロセス全域の
//! シングルトンや環境依存のデフォルトは持たない。

use std::time::Duration;

use crate::{DEFAULT_BAUD, DEFAULT_READ_TIMEOUT_MS, INTER_BYTE_DELAY_MS, OPEN_SETTLE_DELAY_MS};

/// アクセラレータリンクの設定
///
/// パリティ（偶数）・データビット（8）・ストップビット（1）は
/// ハードウェア契約のため固定で、設定項目にしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// ポート名（例: `/dev/ttyUSB0`, `COM59`）
    pub port: String,
    /// ボーレート（デフォルト 9600、代替 921600）
    pub baud: u32,
    /// 1 グループ読み出しのブロック上限
    pub read_timeout: Duration,
    /// ポートオープン後の安定化待ち
    pub settle_delay: Duration,
    /// 送信時のバイト間ペーシング遅延
    pub inter_byte_delay: Duration,
}

impl LinkConfig {
    /// デフォルト値でリンク設定を生成する
    pub fn new(port: impl Into<String>) -> Self {
        LinkConfig {
            port: port.into(),
            baud: DEFAULT_BAUD,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            settle_delay: Duration::from_millis(OPEN_SETTLE_DELAY_MS),
            inter_byte_delay: Duration::from_millis(INTER_BYTE_DELAY_MS),
        }
    }

    /// ボーレートを変更する
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// 読み出しタイムアウトを変更する
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// 安定化待ちを変更する（loopback テストではゼロにする）
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// バイト間遅延を変更する
    pub fn with_inter_byte_delay(mut self, delay: Duration) -> Self {
        self.inter_byte_delay = delay;
        self
    }
}

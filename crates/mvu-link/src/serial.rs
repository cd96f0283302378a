//! serialport クレートによる実 UART リンク

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, DataBits, Parity, SerialPort, StopBits};

use mvu_frame::WIRE_GROUP_LEN;

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::stream::ByteStream;

/// 実シリアルポートに接続されたバイトチャンネル
///
/// アクセラレータの UART フレーミングは偶数パリティ / 8 データビット /
/// 1 ストップビット固定。オープン直後に安定化待ちを挟み、両方向の
/// バッファをクリアしてから使用可能になる。
///
/// ポートは Drop で解放される。明示的なクローズ操作は持たない。
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    /// 1 グループ読み出し全体に適用する期限
    read_timeout: Duration,
    /// 診断用に保持するポート名
    name: String,
}

impl SerialLink {
    /// 設定に従ってポートを開く
    ///
    /// オープン成功後、`config.settle_delay` だけ待ってから
    /// 入出力バッファをクリアする（接続直後の電気的ノイズ対策）。
    ///
    /// # エラー
    /// - `LinkError::PortUnavailable`: オープン失敗。リトライはしない
    pub fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        let port = serialport::new(&config.port, config.baud)
            .parity(Parity::Even)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .timeout(config.read_timeout)
            .open()
            .map_err(|e| LinkError::PortUnavailable {
                port: config.port.clone(),
                reason: e.to_string(),
            })?;

        // 接続の安定化待ち
        thread::sleep(config.settle_delay);

        port.clear(ClearBuffer::All).map_err(|e| LinkError::Io(e.into()))?;

        tracing::info!(port = %config.port, baud = config.baud, "serial link opened");

        Ok(SerialLink {
            port,
            read_timeout: config.read_timeout,
            name: config.port.clone(),
        })
    }

    /// 接続先のポート名
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ByteStream for SerialLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_group(&mut self) -> Result<[u8; WIRE_GROUP_LEN], LinkError> {
        // 期限はグループ全体で 1 つ。部分読みのたびにポートの
        // タイムアウトを残り時間に縮める
        let deadline = Instant::now() + self.read_timeout;
        let port = &mut self.port;
        fill_group(deadline, |buf, remaining| {
            port.set_timeout(remaining).map_err(|e| LinkError::Io(e.into()))?;
            match port.read(buf) {
                Ok(n) => Ok(n),
                // ポートレベルのタイムアウトは「進展なし」として期限判定に委ねる
                Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
                Err(e) => Err(LinkError::Io(e)),
            }
        })
    }

    fn discard_input(&mut self) -> Result<(), LinkError> {
        self.port.clear(ClearBuffer::Input).map_err(|e| LinkError::Io(e.into()))
    }
}

/// 期限内に 1 グループ分のバイトを読み集める
///
/// `read_chunk(buf, remaining)` は残り時間を上限として読み、読めた
/// バイト数を返す（0 = 進展なし）。期限到達または進展なしの時点で
/// それまでに届いた端数バイト数を添えて `ReadTimeout` になる。
/// トリクル入力でも全体のブロック時間が `read_timeout` を超えない。
fn fill_group<F>(deadline: Instant, mut read_chunk: F) -> Result<[u8; WIRE_GROUP_LEN], LinkError>
where
    F: FnMut(&mut [u8], Duration) -> Result<usize, LinkError>,
{
    let mut group = [0u8; WIRE_GROUP_LEN];
    let mut filled = 0;
    while filled < WIRE_GROUP_LEN {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(LinkError::ReadTimeout { received: filled });
        }
        match read_chunk(&mut group[filled..], remaining)? {
            0 => return Err(LinkError::ReadTimeout { received: filled }),
            n => filled += n,
        }
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_group_single_read() {
        let deadline = Instant::now() + Duration::from_secs(1);
        let group = fill_group(deadline, |buf, _remaining| {
            buf.copy_from_slice(&[1, 2, 3, 4][..buf.len()]);
            Ok(buf.len())
        })
        .unwrap();
        assert_eq!(group, [1, 2, 3, 4]);
    }

    #[test]
    fn test_fill_group_trickled_bytes_shrink_remaining() {
        // 1 バイトずつ届いても期限はグループ全体で 1 つ:
        // read_chunk に渡される残り時間は単調に縮む
        let deadline = Instant::now() + Duration::from_secs(1);
        let mut remainings = Vec::new();
        let mut next = 0u8;
        let group = fill_group(deadline, |buf, remaining| {
            remainings.push(remaining);
            thread::sleep(Duration::from_millis(5));
            buf[0] = next;
            next += 1;
            Ok(1)
        })
        .unwrap();

        assert_eq!(group, [0, 1, 2, 3]);
        assert_eq!(remainings.len(), 4);
        for pair in remainings.windows(2) {
            assert!(pair[1] < pair[0], "remaining must shrink: {:?}", remainings);
        }
    }

    #[test]
    fn test_fill_group_expired_deadline_reports_partial() {
        // 2 バイト届いた後に期限が尽きるケース
        let deadline = Instant::now() + Duration::from_millis(20);
        let mut reads = 0;
        let err = fill_group(deadline, |buf, _remaining| {
            reads += 1;
            if reads <= 2 {
                buf[0] = 0xAB;
                Ok(1)
            } else {
                thread::sleep(Duration::from_millis(25));
                Ok(0)
            }
        })
        .unwrap_err();

        assert!(matches!(err, LinkError::ReadTimeout { received: 2 }));
    }

    #[test]
    fn test_fill_group_no_progress_times_out() {
        let deadline = Instant::now() + Duration::from_secs(1);
        let err = fill_group(deadline, |_buf, _remaining| Ok(0)).unwrap_err();
        assert!(matches!(err, LinkError::ReadTimeout { received: 0 }));
    }
}

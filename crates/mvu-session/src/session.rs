//! 交換セッション

use std::thread;
use std::time::{Duration, Instant};

use mvu_frame::{Operand, RequestFrame, ResponseGroup, ResultAssembly, SlotOutcome};
use mvu_link::{ByteStream, LinkError};

use crate::error::SessionError;
use crate::timing::TimingRecord;

/// 完了した 1 交換の成果
#[derive(Debug, Clone)]
pub struct Exchange {
    /// アクセラレータが返した結果ベクトル（各要素 1 ニブル）
    pub result: Vec<u8>,
    /// t0/t1/t2 のタイミング記録
    pub timing: TimingRecord,
    /// デコード中に観測した破損グループ数
    pub corrupted_groups: u64,
}

/// アクセラレータとの交換セッション
///
/// バイトチャンネルを排他的に所有する。並行アクセスはない前提
/// （単一スレッド・同期ブロッキング I/O）。
pub struct Session<S: ByteStream> {
    link: S,
    /// 送信時のバイト間ペーシング遅延
    ///
    /// アクセラレータはこの間隔より速く送られたバイトを取りこぼす。
    inter_byte_delay: Duration,
}

impl<S: ByteStream> Session<S> {
    /// バイトチャンネルを引き取ってセッションを生成する
    pub fn new(link: S, inter_byte_delay: Duration) -> Self {
        Session { link, inter_byte_delay }
    }

    /// 1 リクエスト/レスポンス交換を実行する
    ///
    /// # 引数
    /// - `vector`: 長さ N のオペランドベクトル
    /// - `matrix`: N×N のオペランド行列（行優先のまま渡す。転置は
    ///   エンコーダが行う）
    ///
    /// # 戻り値
    /// 結果ベクトル・タイミング記録・破損グループ数を束ねた `Exchange`。
    ///
    /// # エラー
    /// - `SessionError::Frame`: 検証エラー。送信は行われていない
    /// - `SessionError::ReadTimeout`: レスポンス未完成。`missing` に
    ///   未充填インデックスが入る
    /// - `SessionError::Link`: その他のチャンネル障害
    pub fn execute(
        &mut self,
        vector: &[Operand],
        matrix: &[Vec<Operand>],
    ) -> Result<Exchange, SessionError> {
        let frame = RequestFrame::encode(vector, matrix)?;

        // t0: 最初のバイト書き込み直前
        let issued_at = Instant::now();

        // 1 バイトずつペーシングして送る。まとめて書くとアクセラレータが
        // バイトを取りこぼすため、これは正しさの要件。遅延はバイトの
        // **間**にだけ入れる。最後のバイトの後に眠ると t1 がずれる
        for (i, &byte) in frame.bytes().iter().enumerate() {
            if i > 0 {
                thread::sleep(self.inter_byte_delay);
            }
            self.link.write(&[byte])?;
        }

        // t1: 最後のバイト送出直後。ここからがデバイス計測区間
        let flushed_at = Instant::now();

        let (assembly, completed_at) = self.read_response(frame.dim())?;

        let corrupted_groups = assembly.corrupted_groups();
        let result = assembly
            .into_result()
            .expect("complete assembly must yield a result vector");

        Ok(Exchange {
            result,
            timing: TimingRecord { issued_at, flushed_at, completed_at },
            corrupted_groups,
        })
    }

    /// バッファ済みで未読のバイトを破棄する
    ///
    /// 前回の交換が不完全・破損で終わっていても、次の交換が
    /// 汚染されないよう交換間に呼ぶ。
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.link.discard_input()?;
        Ok(())
    }

    /// バイトチャンネルへの参照（テスト・診断用）
    pub fn link(&self) -> &S {
        &self.link
    }

    /// セッションを分解してバイトチャンネルを返す
    pub fn into_link(self) -> S {
        self.link
    }

    /// グループ単位でレスポンスを読み、結果を組み立てる
    ///
    /// 完成するまで読み続ける。グループ数に上限はなく、終了条件は
    /// 完成またはタイムアウトのみ。
    fn read_response(
        &mut self,
        dim: usize,
    ) -> Result<(ResultAssembly, Instant), SessionError> {
        let mut assembly = ResultAssembly::new(dim)?;

        loop {
            let raw = match self.link.read_group() {
                Ok(raw) => raw,
                Err(LinkError::ReadTimeout { received }) => {
                    let missing = assembly.missing_indices();
                    tracing::warn!(
                        ?missing,
                        partial_bytes = received,
                        "response timed out before completion"
                    );
                    return Err(SessionError::ReadTimeout { missing });
                }
                Err(e) => return Err(SessionError::Link(e)),
            };

            let group = ResponseGroup::from_group(raw);
            match assembly.push_group(&group) {
                SlotOutcome::Corrupted { index } => {
                    // 散発ノイズは許容して読み続ける（中断しない）
                    tracing::warn!(index, raw = ?group.raw(), "corrupted response group");
                }
                SlotOutcome::Filled { index, value, overwrote } => {
                    if overwrote {
                        tracing::debug!(index, value, "duplicate slot overwritten");
                    }
                }
            }

            if assembly.is_complete() {
                // t2: レスポンス完成
                return Ok((assembly, Instant::now()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvu_link::LoopbackLink;

    fn session_with(link: LoopbackLink) -> Session<LoopbackLink> {
        Session::new(link, Duration::ZERO)
    }

    #[test]
    fn test_execute_roundtrip() {
        let mut link = LoopbackLink::new();
        link.queue_slot(0, 8);
        link.queue_slot(1, 11);

        let mut session = session_with(link);
        let vector = vec![2, 1];
        let matrix = vec![vec![2, 4], vec![3, 5]];
        let exchange = session.execute(&vector, &matrix).unwrap();

        assert_eq!(exchange.result, vec![8, 11]);
        assert_eq!(exchange.corrupted_groups, 0);
        // リクエストは転置 + パディング済みで送られている
        assert_eq!(session.link().written(), &[2, 1, 2, 3, 4, 5, 0, 0]);
    }

    #[test]
    fn test_execute_out_of_order_response() {
        let mut link = LoopbackLink::new();
        link.queue_slot(2, 3);
        link.queue_slot(0, 1);
        link.queue_slot(1, 2);

        let mut session = session_with(link);
        let vector = vec![1, 1, 1];
        let matrix = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        let exchange = session.execute(&vector, &matrix).unwrap();

        assert_eq!(exchange.result, vec![1, 2, 3]);
    }

    #[test]
    fn test_execute_tolerates_corrupted_group() {
        let mut link = LoopbackLink::new();
        link.queue_slot(7, 9); // N=2 の範囲外
        link.queue_slot(0, 4);
        link.queue_slot(1, 6);

        let mut session = session_with(link);
        let vector = vec![1, 1];
        let matrix = vec![vec![1, 1], vec![1, 1]];
        let exchange = session.execute(&vector, &matrix).unwrap();

        assert_eq!(exchange.result, vec![4, 6]);
        assert_eq!(exchange.corrupted_groups, 1);
    }

    #[test]
    fn test_execute_times_out_with_missing_indices() {
        let mut link = LoopbackLink::new();
        link.queue_slot(0, 4); // インデックス 1 が永遠に来ない

        let mut session = session_with(link);
        let vector = vec![1, 1];
        let matrix = vec![vec![1, 1], vec![1, 1]];
        let err = session.execute(&vector, &matrix).unwrap_err();

        match err {
            SessionError::ReadTimeout { missing } => assert_eq!(missing, vec![1]),
            other => panic!("expected ReadTimeout, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_sends_nothing() {
        let mut session = session_with(LoopbackLink::new());
        let vector = vec![300, 1]; // 1 バイトに収まらない
        let matrix = vec![vec![1, 1], vec![1, 1]];

        let err = session.execute(&vector, &matrix).unwrap_err();
        assert!(matches!(err, SessionError::Frame(_)));
        assert!(session.link().written().is_empty());
    }

    #[test]
    fn test_reset_discards_stale_response() {
        let mut link = LoopbackLink::new();
        link.queue_slot(0, 1); // 前回の交換の残骸

        let mut session = session_with(link);
        session.reset().unwrap();
        assert_eq!(session.link().pending_len(), 0);
    }

    #[test]
    fn test_pacing_only_between_bytes() {
        // N=1 のフレームはパディング込み 4 バイト → バイト間隔は 3 つ。
        // 最後のバイトの後に遅延を入れると t1 が 1 遅延ぶん遅れて
        // デバイスレイテンシを過小計上してしまう
        let delay = Duration::from_millis(100);
        let mut link = LoopbackLink::new();
        link.queue_slot(0, 1);

        let mut session = Session::new(link, delay);
        let exchange = session.execute(&[1], &[vec![1]]).unwrap();

        let transmit = exchange.timing.transmit_elapsed();
        assert!(transmit >= delay * 3, "transmit_elapsed = {:?}", transmit);
        assert!(transmit < Duration::from_millis(370), "transmit_elapsed = {:?}", transmit);
    }

    #[test]
    fn test_timing_is_monotonic() {
        let mut link = LoopbackLink::new();
        link.queue_slot(0, 0);

        let mut session = session_with(link);
        let exchange = session.execute(&[1], &[vec![1]]).unwrap();

        assert!(exchange.timing.flushed_at >= exchange.timing.issued_at);
        assert!(exchange.timing.completed_at >= exchange.timing.flushed_at);
        assert!(exchange.timing.host_elapsed() >= exchange.timing.device_elapsed());
    }
}

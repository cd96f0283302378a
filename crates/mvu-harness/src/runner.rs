//! トライアルループ

use std::thread;

use rand::Rng;

use mvu_frame::Operand;
use mvu_link::ByteStream;
use mvu_session::{Session, SessionError};

use crate::config::HarnessConfig;
use crate::reference::reference_product;
use crate::stats::RunStatistics;

/// ランダム化試験のハーネス
///
/// セッション（とその下のバイトチャンネル）を排他的に所有し、
/// 設定されたトライアル数だけ交換を繰り返して統計を集める。
pub struct Harness<S: ByteStream> {
    session: Session<S>,
    config: HarnessConfig,
}

impl<S: ByteStream> Harness<S> {
    /// セッションと設定からハーネスを生成する
    pub fn new(session: Session<S>, config: HarnessConfig) -> Self {
        Harness { session, config }
    }

    /// 試験ランを実行する
    ///
    /// トライアルごとに新しいオペランドを生成し、参照結果と
    /// アクセラレータの結果を比較して集計する。
    ///
    /// # エラーの扱い
    /// - タイムアウト → 不正解として数え、次のトライアルへ続行
    /// - それ以外（検証エラー・チャンネル障害）→ 致命的として即座に返す
    pub fn run(&mut self) -> Result<RunStatistics, SessionError> {
        let mut stats = RunStatistics::default();

        for trial in 0..self.config.trials {
            if trial > 0 {
                // 前回の残骸を捨て、アクセラレータがアイドルに戻るのを待つ
                self.session.reset()?;
                thread::sleep(self.config.settle_delay);
            }

            let (vector, matrix) = self.generate_operands();
            let expected = reference_product(&vector, &matrix);

            match self.session.execute(&vector, &matrix) {
                Ok(exchange) => {
                    let correct = exchange.result.len() == expected.len()
                        && exchange
                            .result
                            .iter()
                            .zip(&expected)
                            .all(|(&got, &want)| u64::from(got) == want);

                    if !correct {
                        tracing::warn!(
                            trial,
                            got = ?exchange.result,
                            want = ?expected,
                            "result mismatch"
                        );
                    }
                    tracing::debug!(
                        trial,
                        correct,
                        device_ms = exchange.timing.device_elapsed().as_secs_f64() * 1_000.0,
                        corrupted = exchange.corrupted_groups,
                        "trial finished"
                    );

                    stats.record_exchange(
                        correct,
                        exchange.timing.host_elapsed(),
                        exchange.timing.device_elapsed(),
                        exchange.corrupted_groups,
                    );
                }
                Err(SessionError::ReadTimeout { missing }) => {
                    // 失敗トライアルとして数えるだけでリトライはしない
                    tracing::warn!(trial, ?missing, "trial timed out");
                    stats.record_timeout();
                }
                Err(fatal) => return Err(fatal),
            }
        }

        Ok(stats)
    }

    /// ハーネスを分解してセッションを返す
    pub fn into_session(self) -> Session<S> {
        self.session
    }

    /// 新しいオペランドセットを一様乱数で生成する
    fn generate_operands(&self) -> (Vec<Operand>, Vec<Vec<Operand>>) {
        let mut rng = rand::thread_rng();
        let dim = self.config.dim;
        let max = self.config.operand_max;

        let vector = (0..dim).map(|_| rng.gen_range(0..=max)).collect();
        let matrix = (0..dim)
            .map(|_| (0..dim).map(|_| rng.gen_range(0..=max)).collect())
            .collect();
        (vector, matrix)
    }
}

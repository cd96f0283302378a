//! mvu-frame エラー型

/// Wire Format エンコード/デコードのエラー
///
/// いずれも encode 境界で同期的に検出される。エラー時は
/// 1 バイトも送信されない（部分送信は起こらない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// 次元が不正（ベクトル長 0、MAX_DIM 超過、または行列が N×N でない）
    InvalidDimension {
        /// ベクトル長から決まる期待次元
        expected: usize,
        /// 実際に観測した長さ（不一致だった行の長さ、または行数）
        actual: usize,
    },
    /// オペランドが 1 バイトに収まらない（クランプせず拒否する）
    OperandOutOfRange {
        /// 収まらなかった値
        value: u16,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::InvalidDimension { expected, actual } => {
                write!(f, "Invalid operand dimension: expected {}, got {}", expected, actual)
            }
            FrameError::OperandOutOfRange { value } => {
                write!(
                    f,
                    "Operand {} does not fit in one wire byte (max {})",
                    value,
                    crate::OPERAND_MAX
                )
            }
        }
    }
}

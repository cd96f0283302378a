//! リクエストフレームのエンコード
//!
//! ## Wire Format
//! ```text
//! [vector: N bytes 自然順]
//! [matrix: N*N bytes 転置順（列 j を外側、行 i を内側に走査）]
//! [zero padding: 全長が WIRE_GROUP_LEN の倍数になるまで]
//! ```

use alloc::vec::Vec;

use crate::error::FrameError;
use crate::{Operand, MAX_DIM, OPERAND_MAX, WIRE_GROUP_LEN};

/// エンコード済みリクエストフレーム
///
/// ベクトルと行列をアクセラレータの期待する順序に直列化したもの。
/// 生成はバイト列の構築のみで、実際の送信（バイト間ペーシングを含む）は
/// `mvu-session` の責任。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    dim: usize,
    bytes: Vec<u8>,
}

impl RequestFrame {
    /// オペランドのベクトルと行列をリクエストフレームにエンコードする
    ///
    /// 次元 N は `vector.len()` から決まる。行列はホストの行優先のまま渡し、
    /// ここで転置順（列優先）に直列化される。全長が `WIRE_GROUP_LEN` の
    /// 倍数になるよう末尾にゼロバイトを詰める（例: N=2 は 6 → 8 バイト）。
    ///
    /// # 引数
    /// - `vector`: 長さ N のオペランドベクトル
    /// - `matrix`: N×N のオペランド行列（行優先）
    ///
    /// # エラー
    /// - `FrameError::InvalidDimension`: N == 0、N > MAX_DIM、行列が N×N でない
    /// - `FrameError::OperandOutOfRange`: 値が 1 バイトに収まらない
    pub fn encode(vector: &[Operand], matrix: &[Vec<Operand>]) -> Result<Self, FrameError> {
        let dim = vector.len();
        if dim == 0 || dim > MAX_DIM {
            return Err(FrameError::InvalidDimension { expected: MAX_DIM, actual: dim });
        }
        if matrix.len() != dim {
            return Err(FrameError::InvalidDimension { expected: dim, actual: matrix.len() });
        }
        for row in matrix {
            if row.len() != dim {
                return Err(FrameError::InvalidDimension { expected: dim, actual: row.len() });
            }
        }

        let payload_len = dim + dim * dim;
        let padded_len = payload_len.div_ceil(WIRE_GROUP_LEN) * WIRE_GROUP_LEN;
        let mut bytes = Vec::with_capacity(padded_len);

        for &v in vector {
            bytes.push(operand_byte(v)?);
        }

        // 転置不変条件: 列 j を外側に回し、元の行列の列を順に並べる
        for col in 0..dim {
            for row in matrix {
                bytes.push(operand_byte(row[col])?);
            }
        }

        bytes.resize(padded_len, 0);

        Ok(RequestFrame { dim, bytes })
    }

    /// Wire に送る生バイト列
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// フレームの全バイト数（パディング込み、常に WIRE_GROUP_LEN の倍数）
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// フレームが空か（encode は N >= 1 を要求するため常に false）
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// フレームを構成するグループ数
    pub fn group_count(&self) -> usize {
        self.bytes.len() / WIRE_GROUP_LEN
    }

    /// エンコード時の次元 N
    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// オペランドを Wire バイトに変換する（範囲外は拒否）
fn operand_byte(value: Operand) -> Result<u8, FrameError> {
    if value > OPERAND_MAX {
        return Err(FrameError::OperandOutOfRange { value });
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_transposes_matrix() {
        // M = [[2,4],[3,5]] は列順 [2,3,4,5] で送られる（[2,4,3,5] ではない）
        let vector = vec![2, 1];
        let matrix = vec![vec![2, 4], vec![3, 5]];

        let frame = RequestFrame::encode(&vector, &matrix).unwrap();
        assert_eq!(frame.bytes(), &[2, 1, 2, 3, 4, 5, 0, 0]);
    }

    #[test]
    fn test_encode_pads_to_group_boundary() {
        // N=2: ペイロード 6 バイト → 8 バイト（2 グループ）に切り上げ
        let vector = vec![1, 1];
        let matrix = vec![vec![1, 1], vec![1, 1]];

        let frame = RequestFrame::encode(&vector, &matrix).unwrap();
        assert_eq!(frame.len(), 8);
        assert_eq!(frame.group_count(), 2);
        assert_eq!(frame.len() % WIRE_GROUP_LEN, 0);
        assert_eq!(&frame.bytes()[6..], &[0, 0]);
    }

    #[test]
    fn test_encode_exact_group_boundary_unpadded() {
        // N=3: ペイロード 3 + 9 = 12 バイトでちょうど 3 グループ
        let vector = vec![1, 2, 3];
        let matrix = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];

        let frame = RequestFrame::encode(&vector, &matrix).unwrap();
        assert_eq!(frame.len(), 12);
        assert_eq!(frame.group_count(), 3);
        // 転置順: 列 0 = [1,4,7], 列 1 = [2,5,8], 列 2 = [3,6,9]
        assert_eq!(frame.bytes(), &[1, 2, 3, 1, 4, 7, 2, 5, 8, 3, 6, 9]);
    }

    #[test]
    fn test_encode_rejects_empty_vector() {
        let result = RequestFrame::encode(&[], &[]);
        assert!(matches!(result, Err(FrameError::InvalidDimension { .. })));
    }

    #[test]
    fn test_encode_rejects_oversized_dim() {
        let dim = MAX_DIM + 1;
        let vector = vec![0; dim];
        let matrix = vec![vec![0; dim]; dim];

        let result = RequestFrame::encode(&vector, &matrix);
        assert!(matches!(result, Err(FrameError::InvalidDimension { .. })));
    }

    #[test]
    fn test_encode_rejects_non_square_matrix() {
        let vector = vec![1, 2];
        let matrix = vec![vec![1, 2, 3], vec![4, 5, 6]];

        let result = RequestFrame::encode(&vector, &matrix);
        assert_eq!(result, Err(FrameError::InvalidDimension { expected: 2, actual: 3 }));
    }

    #[test]
    fn test_encode_rejects_wrong_row_count() {
        let vector = vec![1, 2];
        let matrix = vec![vec![1, 2]];

        let result = RequestFrame::encode(&vector, &matrix);
        assert_eq!(result, Err(FrameError::InvalidDimension { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_encode_rejects_operand_out_of_range() {
        // 拒否ポリシー: 256 はクランプされずエラーになる
        let vector = vec![256, 1];
        let matrix = vec![vec![1, 1], vec![1, 1]];

        let result = RequestFrame::encode(&vector, &matrix);
        assert_eq!(result, Err(FrameError::OperandOutOfRange { value: 256 }));
    }

    #[test]
    fn test_encode_accepts_max_operand() {
        let vector = vec![255, 255];
        let matrix = vec![vec![255, 255], vec![255, 255]];

        let frame = RequestFrame::encode(&vector, &matrix).unwrap();
        assert_eq!(&frame.bytes()[..6], &[255, 255, 255, 255, 255, 255]);
    }
}

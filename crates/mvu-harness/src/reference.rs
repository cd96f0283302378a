//! ソフトウェア参照計算
//!
//! アクセラレータの結果を検証するための、正確な整数の
//! 行列ベクトル積。転置**前**の行列の行 i とベクトルの内積が
//! 結果の第 i 要素になる。

use mvu_frame::Operand;

/// 正確な整数の行列ベクトル積 M·v を計算する
///
/// 次元の検証は行わない（encode 境界で既に行われている前提）。
/// オーバーフローしないよう u64 で集計する。
pub fn reference_product(vector: &[Operand], matrix: &[Vec<Operand>]) -> Vec<u64> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(vector)
                .map(|(&m, &v)| u64::from(m) * u64::from(v))
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_product() {
        // M = [[2,4],[3,5]], v = [2,1] → [2*2+4*1, 3*2+5*1] = [8, 11]
        let vector = vec![2, 1];
        let matrix = vec![vec![2, 4], vec![3, 5]];
        assert_eq!(reference_product(&vector, &matrix), vec![8, 11]);
    }

    #[test]
    fn test_identity_matrix() {
        let vector = vec![3, 1, 2];
        let matrix = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        assert_eq!(reference_product(&vector, &matrix), vec![3, 1, 2]);
    }

    #[test]
    fn test_untransposed_rows_are_used() {
        // 参照計算は送信順（転置）ではなく元の行を使う
        let vector = vec![1, 0];
        let matrix = vec![vec![2, 4], vec![3, 5]];
        assert_eq!(reference_product(&vector, &matrix), vec![2, 3]);
    }
}

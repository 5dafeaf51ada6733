use ndarray::prelude::*;
use ndarray::Zip;

/// 向量的 L2 范数
#[inline]
pub fn l2_norm(v: ArrayView1<f64>) -> f64 {
    v.dot(&v).sqrt()
}

/// 余弦相似度，任意一方为零向量时定义为 0
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let denom = l2_norm(a) * l2_norm(b);
    if denom > 0.0 { a.dot(&b) / denom } else { 0.0 }
}

/// 余弦距离，即 `1 - 余弦相似度`
pub fn cosine_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// 计算矩阵各行之间两两的余弦相似度，返回 n × n 矩阵
///
/// 零向量所在的行和列全部为 0。
pub fn cosine_similarity_matrix(m: ArrayView2<f64>) -> Array2<f64> {
    let norms = m.rows().into_iter().map(l2_norm).collect::<Array1<_>>();
    let mut sim = m.dot(&m.t());
    Zip::indexed(&mut sim).for_each(|(i, j), v| {
        let denom = norms[i] * norms[j];
        *v = if denom > 0.0 { *v / denom } else { 0.0 };
    });
    sim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = array![1.0, 0.0];
        let b = array![1.0, 1.0];
        let sim = cosine_similarity(a.view(), b.view());
        assert!((sim - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert!((cosine_distance(a.view(), a.view())).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = array![0.0, 0.0];
        let b = array![1.0, 2.0];
        assert_eq!(cosine_similarity(a.view(), b.view()), 0.0);
        assert_eq!(cosine_similarity(a.view(), a.view()), 0.0);
        assert_eq!(cosine_distance(a.view(), b.view()), 1.0);
    }

    #[test]
    fn test_cosine_similarity_matrix() {
        let m = array![[1.0, 0.0], [2.0, 0.0], [0.0, 0.0], [0.0, 3.0]];
        let sim = cosine_similarity_matrix(m.view());
        assert_eq!(sim.dim(), (4, 4));
        assert!((sim[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((sim[[1, 1]] - 1.0).abs() < 1e-12);
        assert_eq!(sim[[0, 3]], 0.0);
        // 零向量
        assert!(sim.row(2).iter().all(|&v| v == 0.0));
        assert!(sim.column(2).iter().all(|&v| v == 0.0));
    }
}

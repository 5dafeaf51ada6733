use std::collections::{HashMap, HashSet};

use crate::error::{RecommendError, Result};
use crate::ranking::{ImageId, Ranking, top_n};

/// 检查融合权重是否位于 `[0, 1]` 区间
pub fn validate_alpha(alpha: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&alpha) { Ok(alpha) } else { Err(RecommendError::InvalidAlpha(alpha)) }
}

/// 按排名位置累加加权分数，第 i 名得到 `weight * (len - i)` 分
fn add_positional<'a>(scores: &mut HashMap<&'a str, f64>, ranking: &'a [ImageId], weight: f64) {
    if weight == 0.0 {
        return;
    }
    let len = ranking.len();
    for (i, id) in ranking.iter().enumerate() {
        *scores.entry(id.as_str()).or_default() += weight * (len - i) as f64;
    }
}

/// 融合两个推荐结果
///
/// 基于内容的结果权重为 `1 - alpha`，协同过滤的结果权重为 `alpha`，
/// 权重为 0 的一方不参与计算。分数相同的图片按 ID 升序。
pub fn blend(content: &[ImageId], collaborative: &[ImageId], alpha: f64, count: usize) -> Ranking {
    let mut scores = HashMap::new();
    add_positional(&mut scores, content, 1.0 - alpha);
    add_positional(&mut scores, collaborative, alpha);
    top_n(scores, &HashSet::new(), count)
}

use std::cmp::Ordering;
use std::collections::HashSet;

/// 图片 ID，由文件名得到
pub type ImageId = String;

/// 用户 ID
pub type UserId = i64;

/// 推荐结果，按推荐程度从高到低排列
pub type Ranking = Vec<ImageId>;

/// 默认返回的推荐数量
pub const DEFAULT_COUNT: usize = 10;

/// 分数从高到低排序，分数相同则按图片 ID 升序
fn by_score_desc<S: AsRef<str>>(a: &(S, f64), b: &(S, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.as_ref().cmp(b.0.as_ref()))
}

/// 对 `(图片 ID, 分数)` 排序，去掉 `exclude` 中的图片后取前 `count` 个
pub fn top_n<S, I>(scores: I, exclude: &HashSet<&str>, count: usize) -> Ranking
where
    S: AsRef<str>,
    I: IntoIterator<Item = (S, f64)>,
{
    let mut scores = scores
        .into_iter()
        .filter(|(id, _)| !exclude.contains(id.as_ref()))
        .collect::<Vec<_>>();
    scores.sort_by(by_score_desc);
    scores.into_iter().take(count).map(|(id, _)| id.as_ref().to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_order() {
        let scores = vec![("b", 1.0), ("a", 1.0), ("c", 3.0), ("d", 0.5)];
        let result = top_n(scores, &HashSet::new(), 10);
        assert_eq!(result, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_top_n_exclude_and_truncate() {
        let scores = vec![("a", 4.0), ("b", 3.0), ("c", 2.0), ("d", 1.0)];
        let exclude = HashSet::from(["a"]);
        let result = top_n(scores, &exclude, 2);
        assert_eq!(result, vec!["b", "c"]);
    }

    #[test]
    fn test_top_n_empty() {
        let scores: Vec<(String, f64)> = vec![];
        assert!(top_n(scores, &HashSet::new(), 10).is_empty());
    }
}

use std::collections::{BTreeSet, HashSet};

use log::debug;
use ndarray::Array1;

use crate::ranking::{ImageId, Ranking, top_n};
use crate::similarity::cosine_similarity_matrix;
use crate::vectorizer::TfIdfMatrix;

/// 基于内容的推荐
///
/// 对用户喜欢的每张图片，取其与所有图片的余弦相似度并求和作为分数，
/// 去掉已喜欢的图片后取前 `count` 个。不在图库中的图片会被忽略，
/// 没有任何可用的喜欢记录时返回空结果。
pub fn rank_by_content(tfidf: &TfIdfMatrix, liked: &[ImageId], count: usize) -> Ranking {
    let rows = liked.iter().filter_map(|id| tfidf.row_of(id)).collect::<BTreeSet<_>>();
    if rows.is_empty() {
        debug!("用户喜欢的 {} 张图片均不在图库中", liked.len());
        return vec![];
    }

    let similarity = cosine_similarity_matrix(tfidf.matrix().view());
    let mut scores = Array1::<f64>::zeros(tfidf.len());
    for &row in &rows {
        scores += &similarity.row(row);
    }

    let exclude = liked.iter().map(String::as_str).collect::<HashSet<_>>();
    top_n(tfidf.ids().iter().zip(scores.iter().copied()), &exclude, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ImageRecord, TagSnapshot};
    use crate::vectorizer::TfIdfVectorizer;

    fn tfidf(records: Vec<ImageRecord>) -> TfIdfMatrix {
        TfIdfVectorizer::new().fit_transform(&TagSnapshot::from_iter(records)).unwrap()
    }

    fn liked(ids: &[&str]) -> Vec<ImageId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shared_tag_ranks_higher() {
        let tfidf = tfidf(vec![
            ImageRecord::new("A", ["cat", "pet"]),
            ImageRecord::new("B", ["cat", "outdoor"]),
            ImageRecord::new("C", ["car", "city"]),
        ]);
        let result = rank_by_content(&tfidf, &liked(&["A"]), 10);
        assert_eq!(result, vec!["B", "C"]);
    }

    #[test]
    fn test_unknown_liked_images_are_skipped() {
        let tfidf = tfidf(vec![ImageRecord::new("A", ["cat"]), ImageRecord::new("B", ["cat"])]);
        assert!(rank_by_content(&tfidf, &liked(&["X"]), 10).is_empty());
        assert_eq!(rank_by_content(&tfidf, &liked(&["X", "A"]), 10), vec!["B"]);
    }

    #[test]
    fn test_cold_start() {
        let tfidf = tfidf(vec![ImageRecord::new("A", ["cat"])]);
        assert!(rank_by_content(&tfidf, &[], 10).is_empty());
    }

    #[test]
    fn test_untagged_images_score_zero() {
        let tfidf = tfidf(vec![
            ImageRecord::new("A", ["cat"]),
            ImageRecord::new("Z", Vec::<String>::new()),
            ImageRecord::new("B", ["cat", "dog"]),
            ImageRecord::new("E", Vec::<String>::new()),
        ]);
        // 零向量图片分数为 0，按 ID 升序排在最后
        let result = rank_by_content(&tfidf, &liked(&["A"]), 10);
        assert_eq!(result, vec!["B", "E", "Z"]);
    }

    #[test]
    fn test_liked_untagged_image() {
        let tfidf = tfidf(vec![
            ImageRecord::new("A", ["cat"]),
            ImageRecord::new("Z", Vec::<String>::new()),
        ]);
        assert_eq!(rank_by_content(&tfidf, &liked(&["Z"]), 10), vec!["A"]);
    }

    #[test]
    fn test_truncate_to_count() {
        let records = (0..30)
            .map(|i| ImageRecord::new(format!("{i:02}.jpg"), ["tag".to_string(), format!("t{i}")]))
            .collect();
        let tfidf = tfidf(records);
        let result = rank_by_content(&tfidf, &liked(&["00.jpg"]), 10);
        assert_eq!(result.len(), 10);
        assert!(!result.contains(&"00.jpg".to_string()));
        assert_eq!(result[0], "01.jpg");
    }
}

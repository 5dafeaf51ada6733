use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use ndarray::prelude::*;
use rayon::prelude::*;
use regex::Regex;

use crate::error::{RecommendError, Result};
use crate::ranking::ImageId;
use crate::store::TagSnapshot;

/// 图片标签的 TF-IDF 矩阵
///
/// 行与快照中的图片一一对应，顺序一致；列为按字典序排列的词表。
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    ids: Vec<ImageId>,
    index: HashMap<ImageId, usize>,
    vocabulary: Vec<String>,
    matrix: Array2<f64>,
}

impl TfIdfMatrix {
    /// 图片数量
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 按行排列的图片 ID
    pub fn ids(&self) -> &[ImageId] {
        &self.ids
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// 图片 ID 对应的行号
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// 将图片标签转换为 TF-IDF 向量
///
/// 标签拼接为一个文档后转为小写，按 `\b\w\w+\b` 切分为词。
/// 不设置最小文档频率，所有出现过的词都会进入词表。
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    token_pattern: Regex,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    pub fn new() -> Self {
        let token_pattern = Regex::new(r"\b\w\w+\b").expect("failed to build regex");
        Self { token_pattern }
    }

    /// 将一张图片的标签切分为词
    pub fn tokenize<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        let document = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ").to_lowercase();
        self.token_pattern.find_iter(&document).map(|m| m.as_str().to_owned()).collect()
    }

    /// 根据快照构建词表并计算 TF-IDF 矩阵
    ///
    /// idf 使用平滑公式 `ln((1 + n) / (1 + df)) + 1`，每行再做 L2 归一化，
    /// 没有任何词的图片保持为零向量。
    pub fn fit_transform(&self, snapshot: &TagSnapshot) -> Result<TfIdfMatrix> {
        if snapshot.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }

        let records = snapshot.iter().collect::<Vec<_>>();
        let documents =
            records.par_iter().map(|record| self.tokenize(&record.tags)).collect::<Vec<_>>();

        let vocabulary = documents
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let columns = vocabulary
            .iter()
            .enumerate()
            .map(|(i, token)| (token.as_str(), i))
            .collect::<HashMap<_, _>>();

        let (n, d) = (documents.len(), vocabulary.len());
        let mut matrix = Array2::<f64>::zeros((n, d));
        let mut df = Array1::<f64>::zeros(d);
        for (row, tokens) in documents.iter().enumerate() {
            for token in tokens {
                matrix[[row, columns[token.as_str()]]] += 1.0;
            }
            for token in tokens.iter().map(String::as_str).collect::<HashSet<_>>() {
                df[columns[token]] += 1.0;
            }
        }

        let idf = df.mapv(|df| ((1.0 + n as f64) / (1.0 + df)).ln() + 1.0);
        matrix *= &idf;
        for mut row in matrix.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        debug!("TF-IDF 矩阵：{} 张图片，词表大小 {}", n, d);

        let ids = records.iter().map(|record| record.id.clone()).collect::<Vec<_>>();
        let index = ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();

        Ok(TfIdfMatrix { ids, index, vocabulary, matrix })
    }
}

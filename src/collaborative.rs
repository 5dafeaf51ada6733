use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::error::{RecommendError, Result};
use crate::ranking::{ImageId, Ranking, UserId, top_n};
use crate::similarity::cosine_distance;
use crate::store::Preference;

/// 用户 × 图片的二值交互矩阵
///
/// 行为按 ID 升序排列的用户，列为按 ID 升序排列的图片。
/// 同一用户对同一图片的多次喜欢只记为 1。
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    users: Vec<UserId>,
    images: Vec<ImageId>,
    matrix: Array2<f64>,
}

impl InteractionMatrix {
    pub fn from_preferences(preferences: &[Preference]) -> Self {
        let users = preferences.iter().map(|p| p.user_id).collect::<BTreeSet<_>>();
        let images = preferences.iter().map(|p| p.image_id.as_str()).collect::<BTreeSet<_>>();

        let user_index = users.iter().enumerate().map(|(i, &u)| (u, i)).collect::<HashMap<_, _>>();
        let image_index =
            images.iter().enumerate().map(|(i, &id)| (id, i)).collect::<HashMap<_, _>>();

        let mut matrix = Array2::zeros((users.len(), images.len()));
        for p in preferences {
            matrix[[user_index[&p.user_id], image_index[p.image_id.as_str()]]] = 1.0;
        }

        Self {
            users: users.into_iter().collect(),
            images: images.into_iter().map(str::to_owned).collect(),
            matrix,
        }
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn images(&self) -> &[ImageId] {
        &self.images
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// 用户对应的行号，没有任何喜欢记录的用户返回 None
    pub fn user_row(&self, user_id: UserId) -> Option<usize> {
        self.users.binary_search(&user_id).ok()
    }

    /// 按余弦距离查找与第 `row` 行最近的 `k` 个用户，返回 `(行号, 距离)`
    ///
    /// 目标用户本身总是被排除在外；距离相同的用户按 ID 升序。
    pub fn nearest_neighbors(&self, row: usize, k: usize) -> Vec<(usize, f64)> {
        let target = self.matrix.row(row);
        let mut distances = (0..self.users.len())
            .into_par_iter()
            .filter(|&i| i != row)
            .map(|i| (i, cosine_distance(target, self.matrix.row(i))))
            .collect::<Vec<_>>();
        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        distances.truncate(k);
        distances
    }
}

/// 基于用户的协同过滤推荐
///
/// 找到与用户最相似的 `neighbors` 个用户，统计他们喜欢的图片出现的次数，
/// 去掉用户已喜欢的图片后取前 `count` 个。
pub fn rank_by_collaboration(
    preferences: &[Preference],
    user_id: UserId,
    neighbors: usize,
    count: usize,
) -> Result<Ranking> {
    let interactions = InteractionMatrix::from_preferences(preferences);
    let row = interactions.user_row(user_id).ok_or(RecommendError::UnknownUser(user_id))?;

    let k = neighbors.min(interactions.users().len() - 1);
    if k == 0 {
        debug!("用户 {} 没有可用的近邻", user_id);
        return Ok(vec![]);
    }

    let nearest = interactions.nearest_neighbors(row, k);
    debug!(
        "用户 {} 的近邻: {:?}",
        user_id,
        nearest.iter().map(|&(i, d)| (interactions.users()[i], d)).collect::<Vec<_>>()
    );

    let matrix = interactions.matrix();
    let mut popularity = Array1::<f64>::zeros(interactions.images().len());
    for &(i, _) in &nearest {
        popularity += &matrix.row(i);
    }

    let exclude = interactions
        .images()
        .iter()
        .zip(matrix.row(row))
        .filter(|&(_, &liked)| liked > 0.0)
        .map(|(id, _)| id.as_str())
        .collect::<HashSet<_>>();
    let candidates = interactions
        .images()
        .iter()
        .zip(popularity.iter().copied())
        .filter(|&(_, score)| score > 0.0);

    Ok(top_n(candidates, &exclude, count))
}

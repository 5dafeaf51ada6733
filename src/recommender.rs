use std::time::Instant;

use log::{debug, info, warn};

use crate::collaborative;
use crate::config::RecommendOptions;
use crate::content;
use crate::error::{RecommendError, Result};
use crate::hybrid;
use crate::ranking::{ImageId, Ranking, UserId};
use crate::store::{Preference, PreferenceStore, TagSnapshot, TagStore, liked_by};
use crate::vectorizer::{TfIdfMatrix, TfIdfVectorizer};

/// 图片推荐器
///
/// 每次推荐都从存储中读取最新快照并重新构建矩阵，不保留任何索引。
pub struct Recommender<T, P> {
    tags: T,
    preferences: P,
    vectorizer: TfIdfVectorizer,
    options: RecommendOptions,
}

impl<T: TagStore, P: PreferenceStore> Recommender<T, P> {
    pub fn new(tags: T, preferences: P, options: RecommendOptions) -> Self {
        Self { tags, preferences, vectorizer: TfIdfVectorizer::new(), options }
    }

    /// 读取标签和喜欢记录的快照
    async fn snapshot(&self) -> Result<(TagSnapshot, Vec<Preference>)> {
        tokio::try_join!(self.tags.get_all(), self.preferences.get_all())
    }

    /// 计算当前图库的 TF-IDF 矩阵
    pub async fn vectorize(&self) -> Result<TfIdfMatrix> {
        let snapshot = self.tags.get_all().await?;
        self.vectorizer.fit_transform(&snapshot)
    }

    /// 用户喜欢的图片，按第一次喜欢的顺序排列
    pub async fn liked_images(&self, user_id: UserId) -> Result<Vec<ImageId>> {
        let preferences = self.preferences.get_all().await?;
        Ok(liked_by(&preferences, user_id))
    }

    /// 基于内容的推荐，用户没有喜欢记录时返回空结果
    pub async fn rank_by_content(&self, user_id: UserId) -> Result<Ranking> {
        let (snapshot, preferences) = self.snapshot().await?;
        self.content_ranking(&snapshot, &preferences, user_id)
    }

    /// 基于用户的协同过滤推荐
    pub async fn rank_by_collaboration(&self, user_id: UserId, neighbors: usize) -> Result<Ranking> {
        let preferences = self.preferences.get_all().await?;
        self.collaborative_ranking(&preferences, user_id, neighbors)
    }

    /// 混合推荐
    ///
    /// 用户没有喜欢记录时退化为基于内容的推荐，图库为空时退化为协同过滤推荐。
    /// 冷启动用户遇到空图库时返回空结果；其余情况下两者都不可用时返回
    /// [`RecommendError::EmptyCorpus`]。
    pub async fn rank_hybrid(
        &self,
        user_id: UserId,
        alpha: f64,
        neighbors: usize,
    ) -> Result<Ranking> {
        let alpha = hybrid::validate_alpha(alpha)?;
        let (snapshot, preferences) = self.snapshot().await?;

        let cold_start = !preferences.iter().any(|p| p.user_id == user_id);
        let collaborative = if alpha > 0.0 {
            match self.collaborative_ranking(&preferences, user_id, neighbors) {
                Ok(ranking) => Some(ranking),
                Err(RecommendError::UnknownUser(_)) => {
                    warn!("用户 {} 没有喜欢记录，仅使用基于内容的推荐", user_id);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };
        let alpha = if collaborative.is_some() { alpha } else { 0.0 };

        let content = if alpha < 1.0 {
            match self.content_ranking(&snapshot, &preferences, user_id) {
                Ok(ranking) => Some(ranking),
                Err(RecommendError::EmptyCorpus) if collaborative.is_some() => {
                    warn!("图库为空，仅使用协同过滤推荐");
                    None
                }
                Err(RecommendError::EmptyCorpus) if cold_start => {
                    warn!("图库为空且用户 {} 没有喜欢记录，暂无推荐", user_id);
                    return Ok(vec![]);
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };
        let alpha = if content.is_some() { alpha } else { 1.0 };

        let result = hybrid::blend(
            content.as_deref().unwrap_or_default(),
            collaborative.as_deref().unwrap_or_default(),
            alpha,
            self.options.count,
        );
        debug!("混合推荐 (alpha = {}): {:?}", alpha, result);
        Ok(result)
    }

    /// 记录用户喜欢一张图片
    pub async fn record_like(&self, user_id: UserId, image_id: &str) -> Result<()> {
        self.preferences.append(user_id, image_id).await?;
        info!("用户 {} 喜欢了 {}", user_id, image_id);
        Ok(())
    }

    fn content_ranking(
        &self,
        snapshot: &TagSnapshot,
        preferences: &[Preference],
        user_id: UserId,
    ) -> Result<Ranking> {
        let start = Instant::now();
        let tfidf = self.vectorizer.fit_transform(snapshot)?;
        let liked = liked_by(preferences, user_id);
        let result = content::rank_by_content(&tfidf, &liked, self.options.count);
        debug!(
            "基于内容的推荐: 用户 {}，{} 张喜欢的图片，耗时 {:.2}ms",
            user_id,
            liked.len(),
            start.elapsed().as_secs_f32() * 1000.
        );
        Ok(result)
    }

    fn collaborative_ranking(
        &self,
        preferences: &[Preference],
        user_id: UserId,
        neighbors: usize,
    ) -> Result<Ranking> {
        let start = Instant::now();
        let result =
            collaborative::rank_by_collaboration(preferences, user_id, neighbors, self.options.count)?;
        debug!(
            "协同过滤推荐: 用户 {}，k = {}，耗时 {:.2}ms",
            user_id,
            neighbors,
            start.elapsed().as_secs_f32() * 1000.
        );
        Ok(result)
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = RecommendError> = std::result::Result<T, E>;

/// 推荐引擎的错误类型
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// 图库中没有任何图片，无法进行基于内容的推荐
    #[error("图库为空，无法进行基于内容的推荐")]
    EmptyCorpus,

    /// 用户没有任何喜欢记录，无法进行协同过滤推荐
    #[error("用户 {0} 没有任何喜欢记录")]
    UnknownUser(i64),

    #[error("融合权重 alpha 必须位于 [0, 1] 区间，当前为 {0}")]
    InvalidAlpha(f64),

    #[error("读取存储失败")]
    Read(#[source] BoxError),

    #[error("写入喜欢记录失败")]
    Write(#[source] BoxError),
}

impl RecommendError {
    pub fn read(err: impl Into<BoxError>) -> Self {
        Self::Read(err.into())
    }

    pub fn write(err: impl Into<BoxError>) -> Self {
        Self::Write(err.into())
    }

    /// 是否属于“暂时还没有推荐”的冷启动情况，而不是真正的失败
    pub fn is_cold_start(&self) -> bool {
        matches!(self, Self::EmptyCorpus | Self::UnknownUser(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_source_not_repeated_in_message() {
        let err = RecommendError::read("disk unplugged");
        assert_eq!(err.to_string(), "读取存储失败");
        assert_eq!(err.source().unwrap().to_string(), "disk unplugged");

        let chain = format!("{:?}", anyhow::Error::from(RecommendError::write("disk full")));
        assert_eq!(chain.matches("disk full").count(), 1);
    }

    #[test]
    fn test_cold_start_kinds() {
        assert!(RecommendError::EmptyCorpus.is_cold_start());
        assert!(RecommendError::UnknownUser(1).is_cold_start());
        assert!(!RecommendError::InvalidAlpha(2.0).is_cold_start());
    }
}

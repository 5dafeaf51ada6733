use anyhow::Result;
use clap::Parser;

use crate::cli::{SubCommandExtend, open_recommender};
use crate::config::{Opts, RecommendOptions};
use crate::ranking::UserId;

#[derive(Parser, Debug, Clone)]
pub struct LikeCommand {
    /// 用户 ID
    pub user: UserId,
    /// 图片 ID（文件名）
    pub image: String,
}

impl SubCommandExtend for LikeCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let recommender = open_recommender(opts, RecommendOptions::default()).await?;
        recommender.record_like(self.user, &self.image).await?;
        Ok(())
    }
}

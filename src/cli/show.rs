use anyhow::Result;
use clap::Parser;
use log::info;

use crate::cli::{OutputFormat, SubCommandExtend, open_recommender};
use crate::config::{Opts, RecommendOptions};
use crate::ranking::UserId;

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// 用户 ID
    pub user: UserId,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for ShowCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let recommender = open_recommender(opts, RecommendOptions::default()).await?;
        let liked = recommender.liked_images(self.user).await?;
        if liked.is_empty() {
            info!("用户 {} 还没有喜欢任何图片", self.user);
        }
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&liked)?),
            OutputFormat::Table => liked.iter().for_each(|id| println!("{}", id)),
        }
        Ok(())
    }
}

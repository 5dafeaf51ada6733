use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};

use crate::cli::{SubCommandExtend, open_recommender};
use crate::config::{Opts, RecommendOptions};
use crate::ranking::UserId;

#[derive(Parser, Debug, Clone)]
pub struct RecommendCommand {
    #[command(flatten)]
    pub options: RecommendOptions,
    /// 用户 ID
    pub user: UserId,
    /// 推荐方式
    #[arg(short, long, value_enum, default_value_t = Method::Hybrid)]
    pub method: Method,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for RecommendCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let recommender = open_recommender(opts, self.options).await?;

        let start = Instant::now();
        let result = match self.method {
            Method::Content => recommender.rank_by_content(self.user).await,
            Method::Collaborative => {
                recommender.rank_by_collaboration(self.user, self.options.neighbors).await
            }
            Method::Hybrid => {
                recommender
                    .rank_hybrid(self.user, self.options.alpha, self.options.neighbors)
                    .await
            }
        };
        debug!("推荐耗时 {:.2}ms", start.elapsed().as_secs_f32() * 1000.);

        let result = match result {
            Ok(result) => result,
            Err(e) if e.is_cold_start() => {
                warn!("{}", e);
                vec![]
            }
            Err(e) => return Err(e.into()),
        };
        if result.is_empty() {
            info!("用户 {} 暂无推荐结果", self.user);
        }

        print_result(&result, self.output_format)
    }
}

fn print_result(result: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?)
        }
        OutputFormat::Table => {
            for (i, id) in result.iter().enumerate() {
                println!("{}\t{}", i + 1, id);
            }
        }
    }
    Ok(())
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Method {
    /// 基于图片标签的内容推荐
    Content,
    /// 基于用户的协同过滤
    Collaborative,
    /// 两者加权融合
    Hybrid,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Table,
}

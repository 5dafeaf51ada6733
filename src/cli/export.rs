use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use ndarray_npy::write_npy;
use serde_json::json;

use crate::cli::{SubCommandExtend, open_recommender};
use crate::config::{Opts, RecommendOptions};

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// 输出文件，图片 ID 和词表会写入同名的 .json 文件
    #[arg(short, long, default_value = "tfidf.npy")]
    pub output: PathBuf,
}

impl SubCommandExtend for ExportCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let recommender = open_recommender(opts, RecommendOptions::default()).await?;
        let tfidf = recommender.vectorize().await?;

        write_npy(&self.output, tfidf.matrix())?;
        let meta = json!({
            "ids": tfidf.ids(),
            "vocabulary": tfidf.vocabulary(),
        });
        std::fs::write(self.output.with_extension("json"), serde_json::to_vec_pretty(&meta)?)?;

        info!("导出成功：{} 张图片，词表大小 {}", tfidf.len(), tfidf.vocabulary().len());
        Ok(())
    }
}

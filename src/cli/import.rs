use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use indicatif::ProgressBar;
use log::{info, warn};
use tokio::task::block_in_place;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::store::{ImageRecord, PreferenceStore, Store, read_legacy_preferences, read_metadata};
use crate::utils::pb_style;

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// 图片元数据文件，格式为 `[{"filename": "...", "image_tags": [...]}]`
    pub metadata: Option<PathBuf>,
    /// 旧版喜欢记录文件，格式为 `[{"user_id": 1, "image_id": "..."}]`
    #[arg(short, long, value_name = "FILE")]
    pub preferences: Option<PathBuf>,
    /// 每个批次写入的图片数量
    #[arg(long, value_name = "SIZE", default_value_t = 500)]
    pub batch_size: usize,
}

impl SubCommandExtend for ImportCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        if self.metadata.is_none() && self.preferences.is_none() {
            bail!("至少需要指定元数据文件或喜欢记录文件");
        }

        let store = Store::open(&opts.conf_dir, opts.backend).await?;

        if let Some(path) = &self.metadata {
            let records = block_in_place(|| read_metadata(path))?
                .into_iter()
                .map(ImageRecord::from)
                .collect::<Vec<_>>();
            let untagged = records.iter().filter(|r| r.tags.is_empty()).count();
            if untagged > 0 {
                warn!("{} 张图片没有任何标签", untagged);
            }

            let pb = ProgressBar::new(records.len() as u64).with_style(pb_style());
            let mut total = 0;
            for chunk in records.chunks(self.batch_size.max(1)) {
                total = store.import_images(chunk.to_vec()).await?;
                pb.inc(chunk.len() as u64);
            }
            pb.finish_with_message("图片导入完成");
            info!("导入 {} 张图片，图库中共有 {} 张图片", records.len(), total);
        }

        if let Some(path) = &self.preferences {
            let preferences = block_in_place(|| read_legacy_preferences(path))?;
            let pb = ProgressBar::new(preferences.len() as u64).with_style(pb_style());
            for preference in &preferences {
                store.append(preference.user_id, &preference.image_id).await?;
                pb.inc(1);
            }
            pb.finish_with_message("喜欢记录导入完成");
            info!("导入 {} 条喜欢记录", preferences.len());
        }

        Ok(())
    }
}

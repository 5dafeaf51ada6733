mod export;
mod import;
mod like;
mod recommend;
mod show;

pub use export::*;
pub use import::*;
pub use like::*;
pub use recommend::*;
pub use show::*;

use crate::config::{Opts, RecommendOptions};
use crate::recommender::Recommender;
use crate::store::Store;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}

/// 按全局配置打开存储并创建推荐器
async fn open_recommender(
    opts: &Opts,
    options: RecommendOptions,
) -> anyhow::Result<Recommender<Store, Store>> {
    let store = Store::open(&opts.conf_dir, opts.backend).await?;
    Ok(Recommender::new(store.clone(), store, options))
}

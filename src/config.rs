use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;

use crate::cli::*;
use crate::hybrid::validate_alpha;
use crate::ranking::DEFAULT_COUNT;

static CONF_DIR: LazyLock<ConfDir> = LazyLock::new(|| {
    let proj_dirs = ProjectDirs::from("", "imrec", "imrec").expect("failed to get project dir");
    ConfDir { path: proj_dirs.config_dir().to_path_buf() }
});

fn default_config_dir() -> &'static str {
    CONF_DIR.path().to_str().unwrap()
}

/// 推荐参数
#[derive(Parser, Debug, Clone, Copy)]
pub struct RecommendOptions {
    /// 返回的推荐数量
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_COUNT)]
    pub count: usize,
    /// 协同过滤使用的近邻用户数量
    #[arg(short = 'k', long, value_name = "K", default_value_t = 10)]
    pub neighbors: usize,
    /// 混合推荐中协同过滤的权重，基于内容的权重为 1 - alpha
    #[arg(long, value_name = "ALPHA", default_value_t = 0.5, value_parser = parse_alpha)]
    pub alpha: f64,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self { count: DEFAULT_COUNT, neighbors: 10, alpha: 0.5 }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "imrec", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// imrec 配置文件目录
    #[arg(short, long, default_value = default_config_dir())]
    pub conf_dir: ConfDir,
    /// 存储后端
    #[arg(short, long, value_enum, default_value_t = Backend::Sqlite)]
    pub backend: Backend,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 导入图片标签（metadata.json）和旧版喜欢记录
    Import(ImportCommand),
    /// 记录用户喜欢一张图片
    Like(LikeCommand),
    /// 为用户推荐图片
    Recommend(RecommendCommand),
    /// 查看用户喜欢的图片
    Show(ShowCommand),
    /// 导出 TF-IDF 矩阵
    Export(ExportCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// SQLite 数据库
    Sqlite,
    /// metadata.json + JSON Lines 文件
    Json,
}

#[derive(Debug, Clone)]
pub struct ConfDir {
    path: PathBuf,
}

impl ConfDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// 返回数据库文件的路径
    pub fn database(&self) -> PathBuf {
        self.path.join("imrec.db")
    }

    /// 返回图片元数据文件的路径
    pub fn metadata(&self) -> PathBuf {
        self.path.join("metadata.json")
    }

    /// 返回喜欢记录文件的路径
    pub fn preferences(&self) -> PathBuf {
        self.path.join("preferences.jsonl")
    }
}

impl FromStr for ConfDir {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

fn parse_alpha(s: &str) -> anyhow::Result<f64> {
    Ok(validate_alpha(s.parse()?)?)
}

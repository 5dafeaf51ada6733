//! 标签存储与喜欢记录存储
//!
//! 推荐引擎只通过 [`TagStore`] 和 [`PreferenceStore`] 读取数据，
//! 每次调用 `get_all` 都返回一份独立的快照，排序期间不会再访问存储。

use std::collections::{HashMap, HashSet};
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::{Backend, ConfDir};
use crate::error::Result;
use crate::ranking::{ImageId, UserId};

mod json;
mod memory;
mod sqlite;

pub use json::*;
pub use memory::*;
pub use sqlite::*;

/// 图片记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 图片 ID
    pub id: ImageId,
    /// 图片内容标签
    pub tags: Vec<String>,
}

impl ImageRecord {
    pub fn new<S: Into<String>>(id: impl Into<ImageId>, tags: impl IntoIterator<Item = S>) -> Self {
        Self { id: id.into(), tags: tags.into_iter().map(Into::into).collect() }
    }
}

/// 一次“喜欢”记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub user_id: UserId,
    pub image_id: ImageId,
}

impl Preference {
    pub fn new(user_id: UserId, image_id: impl Into<ImageId>) -> Self {
        Self { user_id, image_id: image_id.into() }
    }
}

/// 用户喜欢的图片，去重后按第一次喜欢的顺序排列
pub fn liked_by(preferences: &[Preference], user_id: UserId) -> Vec<ImageId> {
    let mut seen = HashSet::new();
    preferences
        .iter()
        .filter(|p| p.user_id == user_id && seen.insert(p.image_id.as_str()))
        .map(|p| p.image_id.clone())
        .collect()
}

/// 标签存储的一份快照，保持存储的迭代顺序
///
/// 同一个图片 ID 出现多次时，保留第一次出现的位置，标签以最后一次为准。
#[derive(Debug, Clone, Default)]
pub struct TagSnapshot {
    records: Vec<ImageRecord>,
}

impl TagSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ImageRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

impl FromIterator<ImageRecord> for TagSnapshot {
    fn from_iter<I: IntoIterator<Item = ImageRecord>>(iter: I) -> Self {
        let mut records: Vec<ImageRecord> = vec![];
        let mut positions: HashMap<ImageId, usize> = HashMap::new();
        for record in iter {
            match positions.get(&record.id) {
                Some(&pos) => records[pos].tags = record.tags,
                None => {
                    positions.insert(record.id.clone(), records.len());
                    records.push(record);
                }
            }
        }
        Self { records }
    }
}

/// 只读的图片标签存储
pub trait TagStore: Send + Sync {
    /// 获取全部图片及其标签
    fn get_all(&self) -> impl Future<Output = Result<TagSnapshot>> + Send;
}

/// 可追加的喜欢记录存储
pub trait PreferenceStore: Send + Sync {
    /// 获取全部喜欢记录，按写入顺序排列
    fn get_all(&self) -> impl Future<Output = Result<Vec<Preference>>> + Send;

    /// 原子地追加一条喜欢记录
    fn append(&self, user_id: UserId, image_id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// 命令行使用的存储后端
#[derive(Debug, Clone)]
pub enum Store {
    Sqlite(SqliteStore),
    Json(JsonStore),
}

impl Store {
    /// 打开配置目录下指定后端的存储
    pub async fn open(conf_dir: &ConfDir, backend: Backend) -> anyhow::Result<Self> {
        std::fs::create_dir_all(conf_dir.path())?;
        Ok(match backend {
            Backend::Sqlite => Self::Sqlite(SqliteStore::open(conf_dir.database()).await?),
            Backend::Json => Self::Json(JsonStore::new(conf_dir.metadata(), conf_dir.preferences())),
        })
    }

    /// 写入图片标签，已存在的图片会被覆盖
    pub async fn import_images(&self, records: Vec<ImageRecord>) -> anyhow::Result<usize> {
        match self {
            Self::Sqlite(store) => store.import_images(&records).await,
            Self::Json(store) => store.import_images(records).await,
        }
    }
}

impl TagStore for Store {
    async fn get_all(&self) -> Result<TagSnapshot> {
        match self {
            Self::Sqlite(store) => TagStore::get_all(store).await,
            Self::Json(store) => TagStore::get_all(store).await,
        }
    }
}

impl PreferenceStore for Store {
    async fn get_all(&self) -> Result<Vec<Preference>> {
        match self {
            Self::Sqlite(store) => PreferenceStore::get_all(store).await,
            Self::Json(store) => PreferenceStore::get_all(store).await,
        }
    }

    async fn append(&self, user_id: UserId, image_id: &str) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.append(user_id, image_id).await,
            Self::Json(store) => store.append(user_id, image_id).await,
        }
    }
}

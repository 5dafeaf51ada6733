use std::path::Path;

use log::debug;

use super::{ImageRecord, Preference, PreferenceStore, TagSnapshot, TagStore};
use crate::db::{self, Database, crud};
use crate::error::{RecommendError, Result};
use crate::ranking::UserId;

/// 基于 SQLite 的存储
///
/// 每次读取只执行一条 SELECT，在 WAL 模式下即为一份一致的快照。
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub async fn open(filename: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = db::init_db(filename).await?;
        Ok(Self { db })
    }

    /// 在一个事务中写入图片标签，返回写入后的图片总数
    pub async fn import_images(&self, records: &[ImageRecord]) -> anyhow::Result<usize> {
        let mut tx = self.db.begin().await?;
        for record in records {
            crud::upsert_image(&mut *tx, &record.id, &record.tags).await?;
        }
        tx.commit().await?;
        Ok(crud::count_images(&self.db).await? as usize)
    }
}

impl TagStore for SqliteStore {
    async fn get_all(&self) -> Result<TagSnapshot> {
        let rows = crud::get_images(&self.db).await.map_err(RecommendError::read)?;
        debug!("从数据库读取 {} 张图片", rows.len());
        Ok(rows.into_iter().map(|row| ImageRecord { id: row.name, tags: row.tags.0 }).collect())
    }
}

impl PreferenceStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Preference>> {
        let rows = crud::get_preferences(&self.db).await.map_err(RecommendError::read)?;
        Ok(rows.into_iter().map(|row| Preference::new(row.user_id, row.image_id)).collect())
    }

    async fn append(&self, user_id: UserId, image_id: &str) -> Result<()> {
        crud::add_preference(&self.db, user_id, image_id).await.map_err(RecommendError::write)
    }
}

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{ImageRecord, Preference, PreferenceStore, TagSnapshot, TagStore};
use crate::error::Result;
use crate::ranking::UserId;

/// 内存存储，主要用于测试和嵌入式使用
///
/// 读取时在读锁内复制一份快照，写入时在写锁内追加。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: Arc<RwLock<Vec<ImageRecord>>>,
    preferences: Arc<RwLock<Vec<Preference>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(images: Vec<ImageRecord>, preferences: Vec<Preference>) -> Self {
        Self {
            images: Arc::new(RwLock::new(images)),
            preferences: Arc::new(RwLock::new(preferences)),
        }
    }
}

impl TagStore for MemoryStore {
    async fn get_all(&self) -> Result<TagSnapshot> {
        let images = self.images.read().await;
        Ok(images.iter().cloned().collect())
    }
}

impl PreferenceStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Preference>> {
        Ok(self.preferences.read().await.clone())
    }

    async fn append(&self, user_id: UserId, image_id: &str) -> Result<()> {
        self.preferences.write().await.push(Preference::new(user_id, image_id));
        Ok(())
    }
}

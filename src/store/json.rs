use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;

use super::{ImageRecord, Preference, PreferenceStore, TagSnapshot, TagStore};
use crate::error::{BoxError, RecommendError, Result};
use crate::ranking::UserId;

/// `metadata.json` 中的一项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// 图片文件名，同时作为图片 ID
    pub filename: String,
    /// EXIF 信息，推荐时不使用，仅原样保留
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_json::Value>,
    /// 图片分类得到的标签
    #[serde(default)]
    pub image_tags: Vec<String>,
}

impl From<MetadataEntry> for ImageRecord {
    fn from(entry: MetadataEntry) -> Self {
        Self { id: entry.filename, tags: entry.image_tags }
    }
}

/// 读取 `metadata.json`，文件不存在时返回空列表
pub fn read_metadata(path: &Path) -> anyhow::Result<Vec<MetadataEntry>> {
    match fs::read(path) {
        Ok(data) => serde_json::from_slice(&data)
            .with_context(|| format!("无法解析元数据文件 {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
        Err(e) => Err(e).with_context(|| format!("无法读取元数据文件 {}", path.display())),
    }
}

/// 读取旧版的 `user_preferences.json`，格式为 `[{"user_id": 1, "image_id": "x.jpg"}]`
pub fn read_legacy_preferences(path: &Path) -> anyhow::Result<Vec<Preference>> {
    let data =
        fs::read(path).with_context(|| format!("无法读取喜欢记录文件 {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("无法解析喜欢记录文件 {}", path.display()))
}

/// 读取 JSON Lines 格式的喜欢记录，文件不存在时返回空列表
fn read_preference_lines(path: &Path) -> Result<Vec<Preference>, BoxError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };
    let mut preferences = vec![];
    for (i, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let preference = serde_json::from_str(line)
            .map_err(|e| format!("{} 第 {} 行格式错误: {}", path.display(), i + 1, e))?;
        preferences.push(preference);
    }
    Ok(preferences)
}

/// 以追加模式写入一行，整行只调用一次 write
fn append_preference_line(path: &Path, preference: &Preference) -> Result<(), BoxError> {
    let mut line = serde_json::to_vec(preference)?;
    line.push(b'\n');
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&line)?;
    Ok(())
}

/// 基于文件的存储：标签来自 `metadata.json`，喜欢记录保存在 JSON Lines 文件中
#[derive(Debug, Clone)]
pub struct JsonStore {
    metadata: PathBuf,
    preferences: PathBuf,
}

impl JsonStore {
    pub fn new(metadata: impl Into<PathBuf>, preferences: impl Into<PathBuf>) -> Self {
        Self { metadata: metadata.into(), preferences: preferences.into() }
    }

    /// 合并图片标签并重写 `metadata.json`，返回写入后的图片总数
    pub async fn import_images(&self, records: Vec<ImageRecord>) -> anyhow::Result<usize> {
        let path = self.metadata.clone();
        spawn_blocking(move || {
            let mut entries = read_metadata(&path)?;
            let mut positions = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| (entry.filename.clone(), i))
                .collect::<HashMap<_, _>>();
            for record in records {
                match positions.get(&record.id) {
                    Some(&i) => entries[i].image_tags = record.tags,
                    None => {
                        positions.insert(record.id.clone(), entries.len());
                        entries.push(MetadataEntry {
                            filename: record.id,
                            tags: None,
                            image_tags: record.tags,
                        });
                    }
                }
            }

            let mut tmp_file = path.clone();
            tmp_file.set_extension("json.tmp");
            fs::write(&tmp_file, serde_json::to_vec_pretty(&entries)?)?;
            fs::rename(&tmp_file, &path)?;
            Ok::<_, anyhow::Error>(entries.len())
        })
        .await?
    }
}

impl TagStore for JsonStore {
    async fn get_all(&self) -> Result<TagSnapshot> {
        let path = self.metadata.clone();
        let entries = spawn_blocking(move || read_metadata(&path))
            .await
            .map_err(RecommendError::read)?
            .map_err(RecommendError::read)?;
        debug!("从 {} 读取 {} 张图片", self.metadata.display(), entries.len());
        Ok(entries.into_iter().map(ImageRecord::from).collect())
    }
}

impl PreferenceStore for JsonStore {
    async fn get_all(&self) -> Result<Vec<Preference>> {
        let path = self.preferences.clone();
        spawn_blocking(move || read_preference_lines(&path))
            .await
            .map_err(RecommendError::read)?
            .map_err(RecommendError::Read)
    }

    async fn append(&self, user_id: UserId, image_id: &str) -> Result<()> {
        let path = self.preferences.clone();
        let preference = Preference::new(user_id, image_id);
        spawn_blocking(move || append_preference_line(&path, &preference))
            .await
            .map_err(RecommendError::write)?
            .map_err(RecommendError::Write)
    }
}

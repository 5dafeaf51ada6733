use sqlx::FromRow;
use sqlx::types::Json;

/// 图片记录
#[derive(Debug, FromRow)]
pub struct ImageRow {
    /// 图片 ID（文件名）
    pub name: String,
    /// 图片内容标签
    pub tags: Json<Vec<String>>,
}

/// 喜欢记录
#[derive(Debug, FromRow)]
pub struct PreferenceRow {
    pub user_id: i64,
    pub image_id: String,
}

use sqlx::types::Json;
use sqlx::{Executor, Result, Sqlite, SqlitePool};

use super::{ImageRow, PreferenceRow};

/// 添加图片记录，图片已存在时覆盖其标签
pub async fn upsert_image<'c, E>(executor: E, name: &str, tags: &[String]) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO image (name, tags)
        VALUES (?, ?)
        ON CONFLICT (name) DO UPDATE SET tags = excluded.tags
        "#,
    )
    .bind(name)
    .bind(Json(tags))
    .execute(executor)
    .await?;

    Ok(())
}

/// 按添加顺序获取所有图片
pub async fn get_images(executor: &SqlitePool) -> Result<Vec<ImageRow>> {
    sqlx::query_as::<_, ImageRow>(
        r#"
        SELECT name, tags FROM image ORDER BY id ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

/// 查询图片数量
pub async fn count_images(executor: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM image").fetch_one(executor).await
}

/// 追加一条喜欢记录
///
/// 单条 INSERT 语句，不存在先读后写的竞争
pub async fn add_preference<'c, E>(executor: E, user_id: i64, image_id: &str) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO preference (user_id, image_id)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(image_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// 按写入顺序获取所有喜欢记录
pub async fn get_preferences(executor: &SqlitePool) -> Result<Vec<PreferenceRow>> {
    sqlx::query_as::<_, PreferenceRow>(
        r#"
        SELECT user_id, image_id FROM preference ORDER BY id ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

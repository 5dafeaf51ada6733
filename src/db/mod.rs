use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

pub mod crud;
pub mod model;

pub use model::*;

pub type Database = SqlitePool;

/// 并发写入喜欢记录时等待写锁的最长时间
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// 打开推荐数据库，不存在时创建，并执行建表迁移
pub async fn init_db(filename: impl AsRef<Path>) -> Result<Database, sqlx::Error> {
    let filename = filename.as_ref();
    info!("打开推荐数据库: {}", filename.display());

    let options = SqliteConnectOptions::new()
        .filename(filename)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(BUSY_TIMEOUT)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    sqlx::migrate!().run(&pool).await?;
    debug!("图片表与喜欢记录表已就绪");

    Ok(pool)
}

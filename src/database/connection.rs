use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Establish a SeaORM database connection.
pub async fn establish_connection(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // 1. 确保数据库所在的目录存在
    if !db_path.exists() {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
            })?;
        }
        log::info!("首次启动，创建数据库: {}", db_path.display());
    } else {
        log::info!("使用数据库: {}", db_path.display());
    }

    // 2. 使用 `url` crate 安全地构建连接字符串
    let absolute = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DbErr::Conn(RuntimeErr::Internal(format!("无法获取工作目录: {}", e))))?
            .join(db_path)
    };
    let db_url = Url::from_file_path(&absolute).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            absolute.display()
        )))
    })?;

    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());

    // 3. 设置连接选项
    let mut options = ConnectOptions::new(connection_string);
    options
        .max_connections(1) // 对于本地 SQLite，连接池大小为 1 即可
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// 建立内存数据库连接
///
/// 内存数据库只存在于单个连接中，连接池必须固定为 1。
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

/// 生成带时间戳的备份文件名
fn generate_backup_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    format!("storefront_{}.db", timestamp)
}

/// 冷备份数据库文件到指定目录
///
/// 调用时不能有写入正在进行，返回备份文件路径。
pub fn backup_database_file(db_path: &Path, backup_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(backup_dir)?;
    let target = backup_dir.join(generate_backup_filename());
    fs::copy(db_path, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_copies_file_into_backup_dir() {
        let dir = std::env::temp_dir().join(format!("storefront-backup-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let db = dir.join("storefront.db");
        fs::write(&db, b"sqlite bytes").unwrap();

        let backup = backup_database_file(&db, &dir.join("backups")).unwrap();
        assert!(backup.starts_with(dir.join("backups")));
        assert_eq!(fs::read(&backup).unwrap(), b"sqlite bytes");
    }

    #[tokio::test]
    async fn file_database_is_created_on_connect() {
        let dir = std::env::temp_dir().join(format!("storefront-conn-{}", std::process::id()));
        let db_path = dir.join("data").join("storefront.db");

        let conn = establish_connection(&db_path).await.unwrap();
        close_connection(conn).await.unwrap();
        assert!(db_path.exists());
    }
}

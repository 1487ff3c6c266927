pub mod analytics;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod utils;

pub use error::{Result, StoreError};

use config::StoreConfig;
use database::connection::{backup_database_file, close_connection, establish_connection};
use migration::MigratorTrait;

/// 加载配置、初始化日志并输出当前数据库的统计与盈亏报表
pub fn run() -> Result<()> {
    let config = StoreConfig::load()?;
    utils::logs::init(&config.log_level)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(report(config))
}

async fn report(config: StoreConfig) -> Result<()> {
    let db_path = config.resolve_db_path()?;
    let existed = db_path.exists();

    let conn = establish_connection(&db_path).await?;
    log::info!("数据库连接建立成功");

    // 已有数据库在执行迁移前先做冷备份
    let pending = migration::Migrator::get_pending_migrations(&conn).await?;
    if existed && !pending.is_empty() {
        let backup_dir = store_path::backup_dir_for(&db_path);
        match backup_database_file(&db_path, &backup_dir) {
            Ok(path) => log::info!("迁移前备份成功: {}", path.display()),
            Err(e) => log::warn!("迁移前备份失败: {}，继续迁移", e),
        }
    }

    log::info!("开始执行数据库迁移...");
    migration::Migrator::up(&conn, None).await?;
    log::info!("数据库迁移完成");

    let snapshot = database::load_snapshot(&conn).await;
    let output = snapshot.map(|snapshot| {
        serde_json::json!({
            "statistics": snapshot.statistics(&config.analytics),
            "profit": snapshot.profit_report(&config.analytics),
            "users": snapshot.user_summaries(),
        })
    });

    // 无论报表是否成功都关闭连接
    match close_connection(conn).await {
        Ok(_) => log::info!("数据库连接已成功关闭"),
        Err(e) => log::error!("关闭数据库连接时出错: {}", e),
    }

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}

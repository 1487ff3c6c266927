//! 错误类型

use sea_orm::DbErr;
use thiserror::Error;

/// 商店数据层与统计模块的统一错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 数据库连接或读写错误
    #[error("数据库错误: {0}")]
    Database(#[from] DbErr),

    /// 上游数据不符合约定（例如未知的用户状态或角色）
    #[error("数据契约错误: {0}")]
    DataContract(String),

    /// 记录不存在
    #[error("记录不存在: {0}")]
    NotFound(String),

    /// 无效输入
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 序列化/反序列化错误
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 文件读写错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl StoreError {
    /// 将读取阶段的类型解码失败归类为数据契约错误
    ///
    /// SeaORM 在遇到无法映射到枚举的列值时返回 `DbErr::Type`。
    pub fn from_load(err: DbErr) -> Self {
        match err {
            DbErr::Type(msg) => StoreError::DataContract(msg),
            other => StoreError::Database(other),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, StoreError>;

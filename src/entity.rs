//! 数据实体模块
//!
//! 包含商店四张表的 SeaORM 实体定义。

pub mod prelude;

pub mod comments;
pub mod games;
pub mod purchases;
pub mod users;

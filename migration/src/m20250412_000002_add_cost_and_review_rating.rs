//! 添加进货成本与评价评分字段
//!
//! 此迁移添加三个新字段：
//! 1. games 表添加 cost 字段，单件进货成本，可为空（按 0 计算）
//! 2. games 表添加 quantity 字段，进货数量，可为空（按 1 计算）
//! 3. comments 表添加 rating 字段，1-5 分，可为空

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. 给 games 表添加 cost 列
        manager
            .alter_table(
                Table::alter()
                    .table(Games::Table)
                    .add_column(ColumnDef::new(Games::Cost).double().null())
                    .to_owned(),
            )
            .await?;

        // 2. 给 games 表添加 quantity 列
        manager
            .alter_table(
                Table::alter()
                    .table(Games::Table)
                    .add_column(ColumnDef::new(Games::Quantity).integer().null())
                    .to_owned(),
            )
            .await?;

        // 3. 给 comments 表添加 rating 列
        manager
            .alter_table(
                Table::alter()
                    .table(Comments::Table)
                    .add_column(ColumnDef::new(Comments::Rating).integer().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(
            "此迁移无法回滚，请从备份恢复数据库".to_string(),
        ))
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Cost,
    Quantity,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Rating,
}

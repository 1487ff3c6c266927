//! 基线迁移
//!
//! 创建商店的四张核心表：games、users、comments、purchases。
//! comments 与 purchases 对 games/users 的引用不加外键约束，
//! 游戏被删除后历史购买记录仍然保留。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. games 表
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Games::Title).text().not_null())
                    .col(ColumnDef::new(Games::ReleaseDate).text().null())
                    .col(ColumnDef::new(Games::Rating).double().not_null().default(0.0))
                    .col(ColumnDef::new(Games::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Games::Price).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(Games::BackgroundImage)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Games::Trailer).text().null())
                    .col(ColumnDef::new(Games::CreatedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 2. users 表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).text().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).text().not_null())
                    .col(ColumnDef::new(Users::Role).text().not_null().default("user"))
                    .col(
                        ColumnDef::new(Users::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Users::JoinDate).text().null())
                    .to_owned(),
            )
            .await?;

        // 3. comments 表
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Comments::GameId).text().not_null())
                    .col(ColumnDef::new(Comments::Username).text().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::Date).text().not_null())
                    .col(
                        ColumnDef::new(Comments::Inappropriate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_game_id")
                    .table(Comments::Table)
                    .col(Comments::GameId)
                    .to_owned(),
            )
            .await?;

        // 4. purchases 表
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Purchases::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Purchases::UserId).text().not_null())
                    .col(ColumnDef::new(Purchases::GameId).text().not_null())
                    .col(ColumnDef::new(Purchases::Price).double().not_null())
                    .col(ColumnDef::new(Purchases::PurchaseDate).text().not_null())
                    .col(ColumnDef::new(Purchases::PaymentMethod).text().not_null())
                    .col(ColumnDef::new(Purchases::TransactionKey).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_user_id")
                    .table(Purchases::Table)
                    .col(Purchases::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Title,
    ReleaseDate,
    Rating,
    Description,
    Price,
    BackgroundImage,
    Trailer,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Role,
    Status,
    JoinDate,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    GameId,
    Username,
    Content,
    Date,
    Inappropriate,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    UserId,
    GameId,
    Price,
    PurchaseDate,
    PaymentMethod,
    TransactionKey,
}

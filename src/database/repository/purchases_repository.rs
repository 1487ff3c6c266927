//! 购买记录仓库

use crate::database::dto::NewPurchase;
use crate::entity::prelude::*;
use crate::entity::purchases;
use sea_orm::*;

use super::generate_id;

/// 购买记录仓库
pub struct PurchasesRepository;

impl PurchasesRepository {
    fn to_active(purchase: NewPurchase) -> purchases::ActiveModel {
        purchases::ActiveModel {
            id: Set(generate_id()),
            user_id: Set(purchase.user_id),
            game_id: Set(purchase.game_id),
            price: Set(purchase.price),
            purchase_date: Set(purchase.purchase_date),
            payment_method: Set(purchase.payment_method),
            transaction_key: Set(purchase.transaction_key),
        }
    }

    /// 写入一条购买记录
    pub async fn insert<C>(db: &C, purchase: NewPurchase) -> Result<purchases::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::to_active(purchase).insert(db).await
    }

    /// 在事务中批量写入购买记录，保证原子性
    pub async fn insert_many(
        db: &DatabaseConnection,
        purchases: Vec<NewPurchase>,
    ) -> Result<Vec<purchases::Model>, DbErr> {
        if purchases.is_empty() {
            return Ok(Vec::new());
        }

        let txn = db.begin().await?;
        let mut inserted = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            inserted.push(Self::to_active(purchase).insert(&txn).await?);
        }
        txn.commit().await?;

        Ok(inserted)
    }

    /// 获取指定用户的购买记录（按日期倒序）
    pub async fn find_by_user<C>(db: &C, user_id: &str) -> Result<Vec<purchases::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Purchases::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .order_by_desc(purchases::Column::PurchaseDate)
            .order_by_asc(purchases::Column::Id)
            .all(db)
            .await
    }

    /// 获取所有购买记录
    pub async fn find_all<C>(db: &C) -> Result<Vec<purchases::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Purchases::find().all(db).await
    }

    /// 删除购买记录
    pub async fn delete<C>(db: &C, id: &str) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        Purchases::delete_by_id(id.to_string()).exec(db).await
    }
}

//! 游戏数据仓库

use crate::database::dto::{InsertGameData, UpdateGameData};
use crate::entity::games;
use crate::entity::prelude::*;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use super::generate_id;

/// 游戏列表排序选项
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Addtime,
    Title,
    Price,
    Rating,
    ReleaseDate,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏，返回游戏 ID
    pub async fn insert<C>(db: &C, game: InsertGameData) -> Result<String, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().timestamp();

        let game_active = games::ActiveModel {
            id: Set(game.id.unwrap_or_else(generate_id)),
            title: Set(game.title),
            release_date: Set(game.release_date),
            rating: Set(game.rating),
            description: Set(game.description),
            background_image: Set(game.background_image),
            trailer: Set(game.trailer),
            price: Set(game.price),
            cost: Set(game.cost),
            quantity: Set(game.quantity),
            created_at: Set(Some(now)),
        };

        let result = game_active.insert(db).await?;
        Ok(result.id)
    }

    /// 更新游戏数据
    ///
    /// 支持部分更新，未提供的字段保持不变
    pub async fn update<C>(
        db: &C,
        game_id: &str,
        updates: UpdateGameData,
    ) -> Result<games::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let game_active = games::ActiveModel {
            id: Set(game_id.to_string()),
            title: updates.title.map_or(NotSet, Set),
            release_date: updates.release_date.map_or(NotSet, Set),
            rating: updates.rating.map_or(NotSet, Set),
            description: updates.description.map_or(NotSet, Set),
            background_image: updates.background_image.map_or(NotSet, Set),
            trailer: updates.trailer.map_or(NotSet, Set),
            price: updates.price.map_or(NotSet, Set),
            cost: updates.cost.map_or(NotSet, Set),
            quantity: updates.quantity.map_or(NotSet, Set),
            ..Default::default()
        };

        game_active.update(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏
    pub async fn find_by_id<C>(db: &C, id: &str) -> Result<Option<games::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Games::find_by_id(id.to_string()).one(db).await
    }

    /// 批量查询游戏
    pub async fn find_by_ids<C>(db: &C, ids: Vec<String>) -> Result<Vec<games::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Games::find()
            .filter(games::Column::Id.is_in(ids))
            .all(db)
            .await
    }

    /// 获取所有游戏（按添加顺序）
    pub async fn find_all<C>(db: &C) -> Result<Vec<games::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find_sorted(db, SortOption::Addtime, SortOrder::Asc).await
    }

    /// 获取所有游戏并排序
    pub async fn find_sorted<C>(
        db: &C,
        sort_option: SortOption,
        sort_order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let order = match sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let column = match sort_option {
            SortOption::Addtime => games::Column::CreatedAt,
            SortOption::Title => games::Column::Title,
            SortOption::Price => games::Column::Price,
            SortOption::Rating => games::Column::Rating,
            SortOption::ReleaseDate => games::Column::ReleaseDate,
        };

        // 同值时按 ID 保证顺序稳定
        Games::find()
            .order_by(column, order)
            .order_by_asc(games::Column::Id)
            .all(db)
            .await
    }

    /// 按标题模糊搜索（SQLite LIKE 对 ASCII 不区分大小写）
    pub async fn search<C>(db: &C, query: &str) -> Result<Vec<games::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Games::find()
            .filter(games::Column::Title.contains(query))
            .order_by_asc(games::Column::Title)
            .all(db)
            .await
    }

    /// 删除游戏
    pub async fn delete<C>(db: &C, id: &str) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        Games::delete_by_id(id.to_string()).exec(db).await
    }

    /// 批量删除游戏
    pub async fn delete_many<C>(db: &C, ids: Vec<String>) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(DeleteResult { rows_affected: 0 });
        }
        Games::delete_many()
            .filter(games::Column::Id.is_in(ids))
            .exec(db)
            .await
    }
}

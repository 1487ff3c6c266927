//! 商店业务操作
//!
//! 由仓库组合而成：浏览搜索、后台管理、结账、订单查询和统计报表。
//! 仓库返回的 `DbErr` 在这里转换为 [`StoreError`]。

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde::Serialize;

use crate::analytics::{AnalyticsConfig, ProfitReport, Snapshot, Statistics, UserSummary};
use crate::database::dto::{
    CheckoutRequest, InsertGameData, NewComment, NewPurchase, NewUser, UpdateGameData,
};
use crate::database::repository::{
    comments_repository::CommentsRepository,
    games_repository::{GamesRepository, SortOption, SortOrder},
    generate_transaction_key,
    purchases_repository::PurchasesRepository,
    today,
    users_repository::UsersRepository,
};
use crate::entity::users::{UserRole, UserStatus};
use crate::entity::{comments, games, purchases, users};
use crate::error::{Result, StoreError};

/// 更新不存在的记录时 SeaORM 返回 `RecordNotUpdated`，转换为 NotFound；
/// 回读的行无法解码时与读取路径一样归为 DataContract
fn update_err(what: &str, id: &str) -> impl FnOnce(DbErr) -> StoreError {
    let label = format!("{} {}", what, id);
    move |e| match e {
        DbErr::RecordNotUpdated => StoreError::NotFound(label),
        other => StoreError::from_load(other),
    }
}

// ==================== 浏览与搜索 ====================

/// 获取游戏列表
pub async fn list_games(
    db: &DatabaseConnection,
    sort_option: SortOption,
    sort_order: SortOrder,
) -> Result<Vec<games::Model>> {
    Ok(GamesRepository::find_sorted(db, sort_option, sort_order).await?)
}

/// 按标题搜索游戏，空白关键字返回全部游戏
pub async fn search_games(db: &DatabaseConnection, query: &str) -> Result<Vec<games::Model>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(GamesRepository::find_all(db).await?);
    }
    Ok(GamesRepository::search(db, query).await?)
}

/// 获取单个游戏
pub async fn get_game(db: &DatabaseConnection, id: &str) -> Result<games::Model> {
    GamesRepository::find_by_id(db, id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("游戏 {}", id)))
}

// ==================== 游戏管理 ====================

/// 添加游戏
pub async fn add_game(db: &DatabaseConnection, game: InsertGameData) -> Result<String> {
    game.validate()?;
    let id = GamesRepository::insert(db, game).await?;
    log::info!("已添加游戏: {}", id);
    Ok(id)
}

/// 编辑游戏（部分更新）
pub async fn edit_game(
    db: &DatabaseConnection,
    id: &str,
    updates: UpdateGameData,
) -> Result<games::Model> {
    updates.validate()?;
    // 先确认游戏存在，空更新直接返回当前数据
    let current = get_game(db, id).await?;
    let unchanged = updates.title.is_none()
        && updates.release_date.is_none()
        && updates.rating.is_none()
        && updates.description.is_none()
        && updates.price.is_none()
        && updates.cost.is_none()
        && updates.quantity.is_none()
        && updates.background_image.is_none()
        && updates.trailer.is_none();
    if unchanged {
        return Ok(current);
    }

    let game = GamesRepository::update(db, id, updates)
        .await
        .map_err(update_err("游戏", id))?;
    log::info!("已更新游戏: {}", id);
    Ok(game)
}

/// 删除游戏及其评论
///
/// 购买记录作为历史数据保留，统计时按悬空引用处理。
pub async fn remove_game(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let txn = db.begin().await?;

    let removed_comments = CommentsRepository::delete_by_game(&txn, id).await?;
    let removed = GamesRepository::delete(&txn, id).await?;
    if removed.rows_affected == 0 {
        txn.rollback().await?;
        return Err(StoreError::NotFound(format!("游戏 {}", id)));
    }

    txn.commit().await?;
    log::info!(
        "已删除游戏 {}，同时删除 {} 条评论",
        id,
        removed_comments.rows_affected
    );
    Ok(removed.rows_affected)
}

/// 批量删除游戏及其评论，返回实际删除的游戏数
pub async fn remove_games(db: &DatabaseConnection, ids: Vec<String>) -> Result<u64> {
    let txn = db.begin().await?;

    for id in &ids {
        CommentsRepository::delete_by_game(&txn, id).await?;
    }
    let removed = GamesRepository::delete_many(&txn, ids).await?;

    txn.commit().await?;
    log::info!("批量删除了 {} 个游戏", removed.rows_affected);
    Ok(removed.rows_affected)
}

// ==================== 评论管理 ====================

/// 发表评价
pub async fn post_review(db: &DatabaseConnection, comment: NewComment) -> Result<String> {
    comment.validate()?;
    get_game(db, &comment.game_id).await?;
    Ok(CommentsRepository::insert(db, comment).await?)
}

/// 获取指定游戏的评价
pub async fn game_reviews(db: &DatabaseConnection, game_id: &str) -> Result<Vec<comments::Model>> {
    Ok(CommentsRepository::find_by_game(db, game_id).await?)
}

/// 获取所有被标记的评论
pub async fn flagged_comments(db: &DatabaseConnection) -> Result<Vec<comments::Model>> {
    Ok(CommentsRepository::find_flagged(db).await?)
}

/// 标记或取消标记不当评论
pub async fn flag_comment(
    db: &DatabaseConnection,
    id: &str,
    inappropriate: bool,
) -> Result<comments::Model> {
    let comment = CommentsRepository::set_inappropriate(db, id, inappropriate)
        .await
        .map_err(update_err("评论", id))?;
    log::info!("评论 {} 标记状态: {}", id, inappropriate);
    Ok(comment)
}

/// 删除评论
pub async fn remove_comment(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let removed = CommentsRepository::delete(db, id).await?;
    if removed.rows_affected == 0 {
        return Err(StoreError::NotFound(format!("评论 {}", id)));
    }
    log::info!("已删除评论: {}", id);
    Ok(removed.rows_affected)
}

// ==================== 用户管理 ====================

/// 注册用户，用户名不能重复
pub async fn register_user(db: &DatabaseConnection, user: NewUser) -> Result<String> {
    user.validate()?;
    if UsersRepository::find_by_username(db, &user.username)
        .await?
        .is_some()
    {
        return Err(StoreError::InvalidInput(format!(
            "用户名已存在: {}",
            user.username
        )));
    }
    let id = UsersRepository::insert(db, user).await?;
    log::info!("已注册用户: {}", id);
    Ok(id)
}

/// 获取单个用户
pub async fn get_user(db: &DatabaseConnection, id: &str) -> Result<users::Model> {
    UsersRepository::find_by_id(db, id)
        .await
        .map_err(StoreError::from_load)?
        .ok_or_else(|| StoreError::NotFound(format!("用户 {}", id)))
}

/// 修改账号状态
pub async fn set_user_status(
    db: &DatabaseConnection,
    id: &str,
    status: UserStatus,
) -> Result<users::Model> {
    let user = UsersRepository::set_status(db, id, status)
        .await
        .map_err(update_err("用户", id))?;
    log::info!("用户 {} 状态已改为 {:?}", id, status);
    Ok(user)
}

/// 暂停账号
pub async fn suspend_user(db: &DatabaseConnection, id: &str) -> Result<users::Model> {
    set_user_status(db, id, UserStatus::Suspended).await
}

/// 封禁账号
pub async fn ban_user(db: &DatabaseConnection, id: &str) -> Result<users::Model> {
    set_user_status(db, id, UserStatus::Banned).await
}

/// 恢复账号
pub async fn reinstate_user(db: &DatabaseConnection, id: &str) -> Result<users::Model> {
    set_user_status(db, id, UserStatus::Active).await
}

/// 修改用户角色
pub async fn change_role(db: &DatabaseConnection, id: &str, role: UserRole) -> Result<users::Model> {
    let user = UsersRepository::set_role(db, id, role)
        .await
        .map_err(update_err("用户", id))?;
    log::info!("用户 {} 角色已改为 {:?}", id, role);
    Ok(user)
}

/// 删除用户，购买记录保留
pub async fn remove_user(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let removed = UsersRepository::delete(db, id).await?;
    if removed.rows_affected == 0 {
        return Err(StoreError::NotFound(format!("用户 {}", id)));
    }
    log::info!("已删除用户: {}", id);
    Ok(removed.rows_affected)
}

// ==================== 结账与订单 ====================

/// 订单中的一项
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(flatten)]
    pub purchase: purchases::Model,
    /// 游戏已被删除时为 "Unknown Game"
    pub game_title: String,
}

/// 用户的订单历史
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    pub user_id: String,
    pub orders: Vec<OrderLine>,
    pub total_items: usize,
    pub total_spent: f64,
}

/// 购物车结账
///
/// 每件商品生成一条购买记录，成交价取游戏当前售价，各自带独立的交易流水号。
/// 所有记录在同一事务中写入。
pub async fn checkout(
    db: &DatabaseConnection,
    user_id: &str,
    request: CheckoutRequest,
) -> Result<Vec<purchases::Model>> {
    request.validate()?;

    let user = get_user(db, user_id).await?;
    if user.status != UserStatus::Active {
        return Err(StoreError::InvalidInput(format!(
            "用户 {} 当前状态为 {:?}，无法下单",
            user.username, user.status
        )));
    }

    let games = GamesRepository::find_by_ids(db, request.game_ids.clone()).await?;
    let purchase_date = today();

    let mut pending = Vec::with_capacity(request.game_ids.len());
    for game_id in &request.game_ids {
        let game = games
            .iter()
            .find(|g| &g.id == game_id)
            .ok_or_else(|| StoreError::NotFound(format!("游戏 {}", game_id)))?;
        pending.push(NewPurchase {
            user_id: user.id.clone(),
            game_id: game.id.clone(),
            price: game.price,
            purchase_date: purchase_date.clone(),
            payment_method: request.payment_method.clone(),
            transaction_key: generate_transaction_key(),
        });
    }

    let inserted = PurchasesRepository::insert_many(db, pending).await?;
    let total: f64 = inserted.iter().map(|p| p.price).sum();
    log::info!(
        "用户 {} 完成结账：{} 件商品，合计 {:.2}",
        user.username,
        inserted.len(),
        total
    );
    Ok(inserted)
}

/// 后台补录一条购买记录
pub async fn record_purchase(
    db: &DatabaseConnection,
    purchase: NewPurchase,
) -> Result<purchases::Model> {
    purchase.validate()?;
    let record = PurchasesRepository::insert(db, purchase).await?;
    log::info!("已补录购买记录: {}", record.id);
    Ok(record)
}

/// 删除购买记录
pub async fn remove_purchase(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let removed = PurchasesRepository::delete(db, id).await?;
    if removed.rows_affected == 0 {
        return Err(StoreError::NotFound(format!("购买记录 {}", id)));
    }
    log::info!("已删除购买记录: {}", id);
    Ok(removed.rows_affected)
}

/// 查询用户的订单历史（按日期倒序）
pub async fn order_history(db: &DatabaseConnection, user_id: &str) -> Result<OrderHistory> {
    let purchases = PurchasesRepository::find_by_user(db, user_id).await?;

    let game_ids: Vec<String> = purchases.iter().map(|p| p.game_id.clone()).collect();
    let games = GamesRepository::find_by_ids(db, game_ids).await?;

    let total_spent: f64 = purchases.iter().map(|p| p.price).sum();
    let orders: Vec<OrderLine> = purchases
        .into_iter()
        .map(|purchase| {
            let game_title = games
                .iter()
                .find(|g| g.id == purchase.game_id)
                .map(|g| g.title.clone())
                .unwrap_or_else(|| "Unknown Game".to_string());
            OrderLine {
                purchase,
                game_title,
            }
        })
        .collect();

    Ok(OrderHistory {
        user_id: user_id.to_string(),
        total_items: orders.len(),
        orders,
        total_spent,
    })
}

// ==================== 统计报表 ====================

/// 读取四个集合的最新快照
///
/// 用户表中出现未知的 status/role，或数值字段超出范围（如负的进货数量），
/// 会返回 [`StoreError::DataContract`]。
pub async fn load_snapshot(db: &DatabaseConnection) -> Result<Snapshot> {
    let games = GamesRepository::find_all(db).await?;
    let users = UsersRepository::find_all(db)
        .await
        .map_err(StoreError::from_load)?;
    let comments = CommentsRepository::find_all(db).await?;
    let purchases = PurchasesRepository::find_all(db).await?;

    log::debug!(
        "快照已加载：{} 个游戏，{} 个用户，{} 条评论，{} 条购买记录",
        games.len(),
        users.len(),
        comments.len(),
        purchases.len()
    );

    let snapshot = Snapshot {
        games,
        users,
        comments,
        purchases,
    };
    snapshot.validate()?;
    Ok(snapshot)
}

/// 商店整体统计
pub async fn marketplace_statistics(
    db: &DatabaseConnection,
    config: &AnalyticsConfig,
) -> Result<Statistics> {
    Ok(load_snapshot(db).await?.statistics(config))
}

/// 盈亏报表
pub async fn profit_report(
    db: &DatabaseConnection,
    config: &AnalyticsConfig,
) -> Result<ProfitReport> {
    Ok(load_snapshot(db).await?.profit_report(config))
}

/// 用户消费汇总
pub async fn user_summaries(db: &DatabaseConnection) -> Result<Vec<UserSummary>> {
    Ok(load_snapshot(db).await?.user_summaries())
}

//! 评论数据仓库

use crate::database::dto::NewComment;
use crate::entity::comments;
use crate::entity::prelude::*;
use sea_orm::*;

use super::{generate_id, today};

/// 评论数据仓库
pub struct CommentsRepository;

impl CommentsRepository {
    /// 发表评论，新评论默认未被标记
    pub async fn insert<C>(db: &C, comment: NewComment) -> Result<String, DbErr>
    where
        C: ConnectionTrait,
    {
        let comment_active = comments::ActiveModel {
            id: Set(generate_id()),
            game_id: Set(comment.game_id),
            username: Set(comment.username),
            content: Set(comment.content),
            date: Set(comment.date.unwrap_or_else(today)),
            inappropriate: Set(false),
            rating: Set(comment.rating),
        };

        let result = comment_active.insert(db).await?;
        Ok(result.id)
    }

    /// 获取指定游戏的评论（按日期倒序）
    pub async fn find_by_game<C>(db: &C, game_id: &str) -> Result<Vec<comments::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Comments::find()
            .filter(comments::Column::GameId.eq(game_id))
            .order_by_desc(comments::Column::Date)
            .all(db)
            .await
    }

    /// 获取所有评论
    pub async fn find_all<C>(db: &C) -> Result<Vec<comments::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Comments::find().all(db).await
    }

    /// 获取被标记为不当内容的评论
    pub async fn find_flagged<C>(db: &C) -> Result<Vec<comments::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Comments::find()
            .filter(comments::Column::Inappropriate.eq(true))
            .all(db)
            .await
    }

    /// 标记或取消标记不当内容
    pub async fn set_inappropriate<C>(
        db: &C,
        id: &str,
        inappropriate: bool,
    ) -> Result<comments::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let comment_active = comments::ActiveModel {
            id: Set(id.to_string()),
            inappropriate: Set(inappropriate),
            ..Default::default()
        };
        comment_active.update(db).await
    }

    /// 删除评论
    pub async fn delete<C>(db: &C, id: &str) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        Comments::delete_by_id(id.to_string()).exec(db).await
    }

    /// 删除指定游戏的所有评论
    pub async fn delete_by_game<C>(db: &C, game_id: &str) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        Comments::delete_many()
            .filter(comments::Column::GameId.eq(game_id))
            .exec(db)
            .await
    }
}

//! 用户数据仓库

use crate::database::dto::NewUser;
use crate::entity::prelude::*;
use crate::entity::users::{self, UserRole, UserStatus};
use sea_orm::*;

use super::{generate_id, today};

/// 用户数据仓库
pub struct UsersRepository;

impl UsersRepository {
    /// 注册用户，新用户默认为 active
    pub async fn insert<C>(db: &C, user: NewUser) -> Result<String, DbErr>
    where
        C: ConnectionTrait,
    {
        let user_active = users::ActiveModel {
            id: Set(generate_id()),
            username: Set(user.username),
            email: Set(user.email),
            role: Set(user.role.unwrap_or(UserRole::User)),
            status: Set(UserStatus::Active),
            join_date: Set(Some(user.join_date.unwrap_or_else(today))),
        };

        let result = user_active.insert(db).await?;
        Ok(result.id)
    }

    /// 根据 ID 查询用户
    pub async fn find_by_id<C>(db: &C, id: &str) -> Result<Option<users::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Users::find_by_id(id.to_string()).one(db).await
    }

    /// 根据用户名查询用户
    pub async fn find_by_username<C>(db: &C, username: &str) -> Result<Option<users::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// 获取所有用户
    pub async fn find_all<C>(db: &C) -> Result<Vec<users::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Users::find().all(db).await
    }

    /// 修改账号状态
    pub async fn set_status<C>(db: &C, id: &str, status: UserStatus) -> Result<users::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let user_active = users::ActiveModel {
            id: Set(id.to_string()),
            status: Set(status),
            ..Default::default()
        };
        user_active.update(db).await
    }

    /// 修改用户角色
    pub async fn set_role<C>(db: &C, id: &str, role: UserRole) -> Result<users::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let user_active = users::ActiveModel {
            id: Set(id.to_string()),
            role: Set(role),
            ..Default::default()
        };
        user_active.update(db).await
    }

    /// 删除用户
    pub async fn delete<C>(db: &C, id: &str) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        Users::delete_by_id(id.to_string()).exec(db).await
    }
}

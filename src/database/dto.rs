//! 数据传输对象 (DTO)
//!
//! 管理后台与结账流程提交的数据结构，字段命名与前端一致（camelCase）。
//! 写入数据库前在这里完成校验，统计模块只处理已校验的记录。

use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::users::UserRole;
use crate::error::{Result, StoreError};

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

fn check_price(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(StoreError::InvalidInput(format!(
            "{} 必须是非负数，收到 {}",
            field, value
        )));
    }
    Ok(())
}

fn check_rating(value: f64) -> Result<()> {
    if !(1.0..=10.0).contains(&value) {
        return Err(StoreError::InvalidInput(format!(
            "评分必须在 1-10 之间，收到 {}",
            value
        )));
    }
    Ok(())
}

fn check_quantity(value: i32) -> Result<()> {
    if value < 1 {
        return Err(StoreError::InvalidInput(format!(
            "进货数量必须为正整数，收到 {}",
            value
        )));
    }
    Ok(())
}

fn check_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{} 不能为空", field)));
    }
    Ok(())
}

/// 用于插入游戏的数据结构
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertGameData {
    /// 为空时自动生成
    pub id: Option<String>,
    pub title: String,
    pub release_date: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub cost: Option<f64>,
    pub quantity: Option<i32>,
    #[serde(default)]
    pub background_image: String,
    pub trailer: Option<String>,
}

impl InsertGameData {
    pub fn validate(&self) -> Result<()> {
        check_not_blank("标题", &self.title)?;
        check_rating(self.rating)?;
        check_price("售价", self.price)?;
        if let Some(cost) = self.cost {
            check_price("进货成本", cost)?;
        }
        if let Some(quantity) = self.quantity {
            check_quantity(quantity)?;
        }
        Ok(())
    }
}

/// 用于更新游戏的数据结构
///
/// 所有字段均为 Option，允许部分更新。
/// 可空列使用 Option<Option<T>> 来区分"未提供"和"设为 null"。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameData {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub release_date: Option<Option<String>>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub quantity: Option<Option<i32>>,
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub trailer: Option<Option<String>>,
}

impl UpdateGameData {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_not_blank("标题", title)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(price) = self.price {
            check_price("售价", price)?;
        }
        if let Some(Some(cost)) = self.cost {
            check_price("进货成本", cost)?;
        }
        if let Some(Some(quantity)) = self.quantity {
            check_quantity(quantity)?;
        }
        Ok(())
    }
}

/// 注册用户
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// 缺省为普通用户
    pub role: Option<UserRole>,
    /// 缺省为当天
    pub join_date: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        check_not_blank("用户名", &self.username)?;
        if !self.email.contains('@') {
            return Err(StoreError::InvalidInput(format!(
                "邮箱格式不正确: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// 发表评论/评价
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub game_id: String,
    pub username: String,
    pub content: String,
    /// 1-5 分，可不评分
    pub rating: Option<i32>,
    /// 缺省为当天
    pub date: Option<String>,
}

impl NewComment {
    pub fn validate(&self) -> Result<()> {
        check_not_blank("用户名", &self.username)?;
        check_not_blank("评论内容", &self.content)?;
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(StoreError::InvalidInput(format!(
                    "评价评分必须在 1-5 之间，收到 {}",
                    rating
                )));
            }
        }
        Ok(())
    }
}

/// 写入一条购买记录
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub user_id: String,
    pub game_id: String,
    pub price: f64,
    pub purchase_date: String,
    pub payment_method: String,
    pub transaction_key: String,
}

impl NewPurchase {
    pub fn validate(&self) -> Result<()> {
        check_not_blank("用户 ID", &self.user_id)?;
        check_not_blank("游戏 ID", &self.game_id)?;
        check_price("成交价", self.price)?;
        check_not_blank("购买日期", &self.purchase_date)
    }
}

/// 购物车结账请求
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// 购物车中的游戏，每一项生成一条购买记录
    pub game_ids: Vec<String>,
    pub payment_method: String,
}

impl CheckoutRequest {
    pub fn validate(&self) -> Result<()> {
        if self.game_ids.is_empty() {
            return Err(StoreError::InvalidInput("购物车为空".to_string()));
        }
        check_not_blank("支付方式", &self.payment_method)
    }
}

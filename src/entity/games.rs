//! 游戏实体
//!
//! games 表是商店的核心表。cost/quantity 为可选的进货信息，
//! 缺省时分别按 0 和 1 计算。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 单件进货成本缺省值
pub const DEFAULT_COST: f64 = 0.0;
/// 进货数量缺省值
pub const DEFAULT_QUANTITY: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    // === 展示信息 ===
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[sea_orm(column_type = "Text")]
    #[serde(default)]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    #[serde(default)]
    pub background_image: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub trailer: Option<String>,

    // === 价格与进货 ===
    pub price: f64,
    pub cost: Option<f64>,
    pub quantity: Option<i32>,

    // === 时间戳 ===
    pub created_at: Option<i64>,
}

impl Model {
    /// 单件进货成本，缺省为 0
    pub fn unit_cost(&self) -> f64 {
        self.cost.unwrap_or(DEFAULT_COST)
    }

    /// 进货数量，缺省为 1
    pub fn units_acquired(&self) -> i32 {
        self.quantity.unwrap_or(DEFAULT_QUANTITY)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

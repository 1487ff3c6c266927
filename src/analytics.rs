//! 销售统计模块
//!
//! 从 games/users/comments/purchases 四个集合的只读快照计算派生数据：
//! 商店整体统计、热门排行、用户消费汇总以及按游戏的盈亏报表。
//! 这里的函数都不做 I/O，也不持有任何状态，可以被并发调用。

mod index;
mod profit;
mod statistics;

use serde::{Deserialize, Serialize};

pub use profit::{GameProfit, ProfitReport, ProfitStatus, compute_profit_report, profit_margin};
pub use statistics::{
    PopularGame, Statistics, UserActivity, UserSummary, compute_marketplace_statistics,
    user_activity, user_summaries,
};

use crate::entity::{comments, games, purchases, users};
use crate::error::{Result, StoreError};

/// 统计参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 计算浏览数时一次购买折合的评论数
    pub purchase_view_weight: usize,
    /// 综合热度分中购买数的权重
    pub purchase_score_weight: usize,
    /// 热门游戏列表长度
    pub popular_limit: usize,
    /// 最近订单列表长度
    pub recent_limit: usize,
    /// 判定持平的利润容差，0 表示精确比较
    pub break_even_epsilon: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            purchase_view_weight: 3,
            purchase_score_weight: 10,
            popular_limit: 5,
            recent_limit: 10,
            break_even_epsilon: 0.0,
        }
    }
}

impl AnalyticsConfig {
    /// 持平容差必须是有限的非负数，否则利润为 0 的游戏会被误判
    pub fn validate(&self) -> Result<()> {
        if !self.break_even_epsilon.is_finite() || self.break_even_epsilon < 0.0 {
            return Err(StoreError::Config(format!(
                "break_even_epsilon 必须是非负有限数，收到 {}",
                self.break_even_epsilon
            )));
        }
        Ok(())
    }
}

/// 四个集合的只读快照
///
/// JSON 形式与 json-server 的 db.json 一致，缺失的集合按空处理。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub games: Vec<games::Model>,
    pub users: Vec<users::Model>,
    pub comments: Vec<comments::Model>,
    pub purchases: Vec<purchases::Model>,
}

impl Snapshot {
    /// 从 JSON 文档解析快照
    ///
    /// 字段缺失或枚举取值未知（如 status 为 "archived"）都视为数据契约错误。
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(raw).map_err(|e| StoreError::DataContract(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// 检查数值字段是否在约定范围内
    ///
    /// 售价、成本、成交价不能为负；进货数量至少为 1；游戏评分在 0-10 之间（0 表示未评分）；
    /// 评价评分在 1-5 之间。缺省的成本和数量不算违约。
    pub fn validate(&self) -> Result<()> {
        for game in &self.games {
            check_amount("游戏", &game.id, "price", game.price)?;
            if let Some(cost) = game.cost {
                check_amount("游戏", &game.id, "cost", cost)?;
            }
            if let Some(quantity) = game.quantity {
                if quantity < 1 {
                    return Err(contract_violation("游戏", &game.id, "quantity", quantity));
                }
            }
            if !(0.0..=10.0).contains(&game.rating) {
                return Err(contract_violation("游戏", &game.id, "rating", game.rating));
            }
        }
        for comment in &self.comments {
            if let Some(rating) = comment.rating {
                if !(1..=5).contains(&rating) {
                    return Err(contract_violation("评论", &comment.id, "rating", rating));
                }
            }
        }
        for purchase in &self.purchases {
            check_amount("购买记录", &purchase.id, "price", purchase.price)?;
        }
        Ok(())
    }

    pub fn statistics(&self, config: &AnalyticsConfig) -> Statistics {
        compute_marketplace_statistics(
            &self.games,
            &self.users,
            &self.comments,
            &self.purchases,
            config,
        )
    }

    pub fn profit_report(&self, config: &AnalyticsConfig) -> ProfitReport {
        compute_profit_report(&self.games, &self.purchases, config)
    }

    pub fn user_summaries(&self) -> Vec<UserSummary> {
        user_summaries(&self.users, &self.purchases)
    }
}

fn contract_violation(kind: &str, id: &str, field: &str, value: impl std::fmt::Display) -> StoreError {
    StoreError::DataContract(format!("{} {} 的 {} 超出范围: {}", kind, id, field, value))
}

fn check_amount(kind: &str, id: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(contract_violation(kind, id, field, value));
    }
    Ok(())
}

//! 按游戏的盈亏报表
//!
//! 收入按购买时的成交价累加，成本为单件进货成本 × 进货数量。

use serde::{Deserialize, Serialize};

use super::AnalyticsConfig;
use super::index::GameIndex;
use crate::entity::{games, purchases};

/// 盈亏状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfitStatus {
    Profit,
    Loss,
    BreakEven,
}

impl ProfitStatus {
    /// 按利润分类，`epsilon` 为 0 时等同于精确比较
    pub fn classify(profit: f64, epsilon: f64) -> Self {
        if profit > epsilon {
            ProfitStatus::Profit
        } else if profit < -epsilon {
            ProfitStatus::Loss
        } else {
            ProfitStatus::BreakEven
        }
    }
}

/// 单个游戏的盈亏
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProfit {
    pub game_id: String,
    pub title: String,
    pub price: f64,
    pub cost: f64,
    pub quantity: i32,
    pub sold_quantity: usize,
    pub revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// 利润率（百分比），收入为 0 时为 0
    pub profit_margin: f64,
    pub status: ProfitStatus,
}

/// 全部游戏的盈亏报表
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub games: Vec<GameProfit>,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_profit_margin: f64,
    pub overall_status: ProfitStatus,
}

/// 利润率，收入不为正时返回 0
pub fn profit_margin(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

/// 计算每个游戏及整体的盈亏
///
/// 指向不存在游戏的购买记录不计入任何游戏，也不计入报表总收入。
pub fn compute_profit_report(
    games: &[games::Model],
    purchases: &[purchases::Model],
    config: &AnalyticsConfig,
) -> ProfitReport {
    let index = GameIndex::build(&[], purchases);

    let rows: Vec<GameProfit> = games
        .iter()
        .map(|game| {
            let tally = index.tally(&game.id);
            let cost = game.unit_cost();
            let quantity = game.units_acquired();
            let total_cost = cost * f64::from(quantity);
            let profit = tally.revenue - total_cost;

            GameProfit {
                game_id: game.id.clone(),
                title: game.title.clone(),
                price: game.price,
                cost,
                quantity,
                sold_quantity: tally.purchases,
                revenue: tally.revenue,
                total_cost,
                profit,
                profit_margin: profit_margin(profit, tally.revenue),
                status: ProfitStatus::classify(profit, config.break_even_epsilon),
            }
        })
        .collect();

    let total_cost: f64 = rows.iter().map(|r| r.total_cost).sum();
    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    let total_profit: f64 = rows.iter().map(|r| r.profit).sum();

    ProfitReport {
        games: rows,
        total_cost,
        total_revenue,
        total_profit,
        total_profit_margin: profit_margin(total_profit, total_revenue),
        overall_status: ProfitStatus::classify(total_profit, config.break_even_epsilon),
    }
}

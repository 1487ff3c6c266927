//! 商店整体统计
//!
//! 从四个集合的快照计算总量、用户活跃度分布、热门游戏和最近订单。
//! 所有计算都是纯函数，不修改输入。

use serde::Serialize;

use super::AnalyticsConfig;
use super::index::GameIndex;
use crate::entity::users::UserStatus;
use crate::entity::{comments, games, purchases, users};

/// 按账号状态统计的用户数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserActivity {
    pub active: usize,
    pub suspended: usize,
    pub banned: usize,
}

/// 带实时热度数据的游戏
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularGame {
    #[serde(flatten)]
    pub game: games::Model,
    /// 评论数 + 购买数 × 权重
    pub real_views: usize,
    pub real_purchases: usize,
}

impl PopularGame {
    /// 综合热度分：购买数 × 权重 + 浏览数
    pub fn score(&self, config: &AnalyticsConfig) -> usize {
        self.real_purchases * config.purchase_score_weight + self.real_views
    }
}

/// 商店整体统计结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_games: usize,
    pub total_users: usize,
    pub total_comments: usize,
    pub total_purchases: usize,
    pub total_revenue: f64,
    pub flagged_comments: usize,
    /// 带评分评论的平均分，没有评分时为 0
    pub average_rating: f64,
    pub user_activity: UserActivity,
    pub popular_games: Vec<PopularGame>,
    pub recent_purchases: Vec<purchases::Model>,
}

/// 用户的累计消费
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: users::Model,
    pub total_purchases: usize,
    pub total_spent: f64,
}

/// 计算商店整体统计
pub fn compute_marketplace_statistics(
    games: &[games::Model],
    users: &[users::Model],
    comments: &[comments::Model],
    purchases: &[purchases::Model],
    config: &AnalyticsConfig,
) -> Statistics {
    let index = GameIndex::build(comments, purchases);

    Statistics {
        total_games: games.len(),
        total_users: users.len(),
        total_comments: comments.len(),
        total_purchases: purchases.len(),
        total_revenue: purchases.iter().map(|p| p.price).sum(),
        flagged_comments: comments.iter().filter(|c| c.inappropriate).count(),
        average_rating: average_rating(comments),
        user_activity: user_activity(users),
        popular_games: popular_games(games, &index, config),
        recent_purchases: recent_purchases(purchases, config.recent_limit),
    }
}

/// 按账号状态分桶计数
pub fn user_activity(users: &[users::Model]) -> UserActivity {
    users
        .iter()
        .fold(UserActivity::default(), |mut activity, user| {
            match user.status {
                UserStatus::Active => activity.active += 1,
                UserStatus::Suspended => activity.suspended += 1,
                UserStatus::Banned => activity.banned += 1,
            }
            activity
        })
}

/// 每个用户的购买次数和累计消费
pub fn user_summaries(users: &[users::Model], purchases: &[purchases::Model]) -> Vec<UserSummary> {
    users
        .iter()
        .map(|user| {
            let (total_purchases, total_spent) = purchases
                .iter()
                .filter(|p| p.user_id == user.id)
                .fold((0usize, 0.0f64), |(count, spent), p| (count + 1, spent + p.price));
            UserSummary {
                user: user.clone(),
                total_purchases,
                total_spent,
            }
        })
        .collect()
}

fn average_rating(comments: &[comments::Model]) -> f64 {
    let (count, sum) = comments
        .iter()
        .filter_map(|c| c.rating)
        .fold((0usize, 0i64), |(count, sum), rating| (count + 1, sum + rating as i64));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn popular_games(
    games: &[games::Model],
    index: &GameIndex<'_>,
    config: &AnalyticsConfig,
) -> Vec<PopularGame> {
    let mut ranked: Vec<PopularGame> = games
        .iter()
        .map(|game| {
            let tally = index.tally(&game.id);
            PopularGame {
                game: game.clone(),
                real_views: tally.comments + tally.purchases * config.purchase_view_weight,
                real_purchases: tally.purchases,
            }
        })
        .collect();

    // sort_by 是稳定排序，同分游戏保持原有顺序
    ranked.sort_by(|a, b| b.score(config).cmp(&a.score(config)));
    ranked.truncate(config.popular_limit);
    ranked
}

fn recent_purchases(purchases: &[purchases::Model], limit: usize) -> Vec<purchases::Model> {
    let mut recent = purchases.to_vec();
    // ISO 日期按字典序比较即可；同一天的订单保持原有顺序
    recent.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
    recent.truncate(limit);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{comment, game, purchase, user};

    fn stats(
        games: &[games::Model],
        users: &[users::Model],
        comments: &[comments::Model],
        purchases: &[purchases::Model],
    ) -> Statistics {
        compute_marketplace_statistics(games, users, comments, purchases, &AnalyticsConfig::default())
    }

    #[test]
    fn totals_match_collection_sizes() {
        let games = vec![game("g1", 10.0), game("g2", 20.0)];
        let users = vec![user("u1", UserStatus::Active)];
        let comments = vec![comment("c1", "g1")];
        let purchases = vec![
            purchase("p1", "u1", "g1", 19.99, "2024-01-01"),
            purchase("p2", "u1", "g2", 5.01, "2024-01-02"),
        ];

        let s = stats(&games, &users, &comments, &purchases);
        assert_eq!(s.total_games, 2);
        assert_eq!(s.total_users, 1);
        assert_eq!(s.total_comments, 1);
        assert_eq!(s.total_purchases, 2);
        assert!((s.total_revenue - 25.0).abs() < 1e-9);
    }

    #[test]
    fn revenue_includes_purchases_of_deleted_games() {
        let purchases = vec![
            purchase("p1", "u1", "gone", 12.5, "2024-01-01"),
            purchase("p2", "u1", "g1", 7.5, "2024-01-01"),
        ];
        let s = stats(&[game("g1", 7.5)], &[], &[], &purchases);
        assert!((s.total_revenue - 20.0).abs() < 1e-9);
        assert_eq!(s.popular_games[0].real_purchases, 1);
    }

    #[test]
    fn counts_flagged_comments() {
        let mut bad = comment("c2", "g1");
        bad.inappropriate = true;
        let comments = vec![comment("c1", "g1"), bad];

        let s = stats(&[], &[], &comments, &[]);
        assert_eq!(s.flagged_comments, 1);
    }

    #[test]
    fn buckets_users_by_status() {
        let users = vec![
            user("u1", UserStatus::Active),
            user("u2", UserStatus::Active),
            user("u3", UserStatus::Banned),
        ];

        let s = stats(&[], &users, &[], &[]);
        assert_eq!(
            s.user_activity,
            UserActivity {
                active: 2,
                suspended: 0,
                banned: 1
            }
        );
    }

    #[test]
    fn real_views_weight_purchases() {
        let games = vec![game("g1", 10.0)];
        let comments = vec![comment("c1", "g1")];
        let purchases = vec![purchase("p1", "u1", "g1", 10.0, "2024-01-01")];

        let s = stats(&games, &[], &comments, &purchases);
        let g1 = &s.popular_games[0];
        assert_eq!(g1.real_views, 4);
        assert_eq!(g1.real_purchases, 1);
    }

    #[test]
    fn popular_games_ranked_by_composite_score() {
        let games = vec![game("g1", 1.0), game("g2", 1.0), game("g3", 1.0)];
        // g2: 1 次购买 -> 10 + 3 = 13；g3: 5 条评论 -> 5；g1: 0
        let comments: Vec<_> = (0..5).map(|i| comment(&format!("c{i}"), "g3")).collect();
        let purchases = vec![purchase("p1", "u1", "g2", 1.0, "2024-01-01")];

        let s = stats(&games, &[], &comments, &purchases);
        let order: Vec<&str> = s.popular_games.iter().map(|p| p.game.id.as_str()).collect();
        assert_eq!(order, vec!["g2", "g3", "g1"]);
    }

    #[test]
    fn equal_scores_keep_original_order() {
        let games = vec![game("b", 1.0), game("a", 1.0), game("c", 1.0)];
        let comments = vec![comment("c1", "a"), comment("c2", "b")];

        let s = stats(&games, &[], &comments, &[]);
        let order: Vec<&str> = s.popular_games.iter().map(|p| p.game.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn popular_and_recent_lists_are_capped() {
        let games: Vec<_> = (0..8).map(|i| game(&format!("g{i}"), 1.0)).collect();
        let purchases: Vec<_> = (0..15)
            .map(|i| purchase(&format!("p{i}"), "u1", "g0", 1.0, &format!("2024-01-{:02}", i + 1)))
            .collect();

        let s = stats(&games, &[], &[], &purchases);
        assert_eq!(s.popular_games.len(), 5);
        assert_eq!(s.recent_purchases.len(), 10);
    }

    #[test]
    fn recent_purchases_newest_first_and_stable() {
        let purchases = vec![
            purchase("p1", "u1", "g1", 1.0, "2024-01-10"),
            purchase("p2", "u1", "g1", 1.0, "2024-03-01"),
            purchase("p3", "u1", "g1", 1.0, "2024-01-10"),
            purchase("p4", "u1", "g1", 1.0, "2024-02-15"),
        ];

        let s = stats(&[], &[], &[], &purchases);
        let order: Vec<&str> = s.recent_purchases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["p2", "p4", "p1", "p3"]);
    }

    #[test]
    fn malformed_dates_do_not_panic() {
        let purchases = vec![
            purchase("p1", "u1", "g1", 1.0, "not a date"),
            purchase("p2", "u1", "g1", 1.0, ""),
            purchase("p3", "u1", "g1", 1.0, "2024-01-01"),
        ];

        let s = stats(&[], &[], &[], &purchases);
        assert_eq!(s.recent_purchases.len(), 3);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let games = vec![game("g1", 10.0), game("g2", 20.0)];
        let users = vec![user("u1", UserStatus::Suspended)];
        let comments = vec![comment("c1", "g2")];
        let purchases = vec![purchase("p1", "u1", "g1", 10.0, "2024-01-01")];

        let first = stats(&games, &users, &comments, &purchases);
        let second = stats(&games, &users, &comments, &purchases);
        assert_eq!(first, second);
    }

    #[test]
    fn average_rating_ignores_unrated_comments() {
        let mut rated_high = comment("c1", "g1");
        rated_high.rating = Some(5);
        let mut rated_low = comment("c2", "g1");
        rated_low.rating = Some(2);
        let comments = vec![rated_high, rated_low, comment("c3", "g1")];

        let s = stats(&[], &[], &comments, &[]);
        assert!((s.average_rating - 3.5).abs() < 1e-9);
        assert_eq!(stats(&[], &[], &[], &[]).average_rating, 0.0);
    }

    #[test]
    fn custom_weights_change_ranking() {
        let games = vec![game("g1", 1.0), game("g2", 1.0)];
        let comments: Vec<_> = (0..4).map(|i| comment(&format!("c{i}"), "g1")).collect();
        let purchases = vec![purchase("p1", "u1", "g2", 1.0, "2024-01-01")];
        let config = AnalyticsConfig {
            purchase_view_weight: 0,
            purchase_score_weight: 1,
            ..AnalyticsConfig::default()
        };

        let s = compute_marketplace_statistics(&games, &[], &comments, &purchases, &config);
        assert_eq!(s.popular_games[0].game.id, "g1");
        assert_eq!(s.popular_games[1].real_views, 0);
    }

    #[test]
    fn user_summaries_total_spending() {
        let users = vec![user("u1", UserStatus::Active), user("u2", UserStatus::Active)];
        let purchases = vec![
            purchase("p1", "u1", "g1", 29.99, "2024-01-01"),
            purchase("p2", "u1", "g2", 10.01, "2024-01-02"),
        ];

        let summaries = user_summaries(&users, &purchases);
        assert_eq!(summaries[0].total_purchases, 2);
        assert!((summaries[0].total_spent - 40.0).abs() < 1e-9);
        assert_eq!(summaries[1].total_purchases, 0);
        assert_eq!(summaries[1].total_spent, 0.0);
    }

    #[test]
    fn statistics_serialize_camel_case() {
        let s = stats(&[game("g1", 5.0)], &[], &[], &[]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["totalGames"], 1);
        assert_eq!(json["userActivity"]["active"], 0);
        assert_eq!(json["popularGames"][0]["realViews"], 0);
        assert_eq!(json["popularGames"][0]["title"], "Game g1");
    }
}

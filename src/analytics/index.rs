//! 按游戏 ID 汇总评论与购买记录的查找表

use std::collections::HashMap;

use crate::entity::{comments, purchases};

/// 单个游戏的原始计数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct GameTally {
    pub comments: usize,
    pub purchases: usize,
    pub revenue: f64,
}

/// 以游戏 ID 为键的计数表，键借用自输入切片
pub(crate) struct GameIndex<'a> {
    tallies: HashMap<&'a str, GameTally>,
}

impl<'a> GameIndex<'a> {
    /// 一次遍历评论和购买记录建立索引
    ///
    /// 未被任何游戏引用的记录同样会建档，但查询时只会按游戏 ID 取值，
    /// 悬空引用因此不影响任何游戏的计数。
    pub fn build(comments: &'a [comments::Model], purchases: &'a [purchases::Model]) -> Self {
        let mut tallies: HashMap<&'a str, GameTally> = HashMap::new();

        for comment in comments {
            tallies.entry(comment.game_id.as_str()).or_default().comments += 1;
        }
        for purchase in purchases {
            let tally = tallies.entry(purchase.game_id.as_str()).or_default();
            tally.purchases += 1;
            tally.revenue += purchase.price;
        }

        Self { tallies }
    }

    /// 取某个游戏的计数，没有记录时全为 0
    pub fn tally(&self, game_id: &str) -> GameTally {
        self.tallies.get(game_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{comment, purchase};

    #[test]
    fn counts_and_revenue_per_game() {
        let comments = vec![comment("c1", "g1"), comment("c2", "g1"), comment("c3", "g2")];
        let purchases = vec![
            purchase("p1", "u1", "g1", 20.0, "2024-01-01"),
            purchase("p2", "u1", "g1", 25.0, "2024-01-02"),
        ];

        let index = GameIndex::build(&comments, &purchases);
        let g1 = index.tally("g1");
        assert_eq!(g1.comments, 2);
        assert_eq!(g1.purchases, 2);
        assert!((g1.revenue - 45.0).abs() < 1e-9);

        let g2 = index.tally("g2");
        assert_eq!((g2.comments, g2.purchases), (1, 0));
    }

    #[test]
    fn unknown_game_is_all_zero() {
        let index = GameIndex::build(&[], &[]);
        assert_eq!(index.tally("missing"), GameTally::default());
    }
}

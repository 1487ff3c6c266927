//! 数据仓库
//!
//! 每张表一个仓库，只负责 CRUD，不做业务校验。

pub mod comments_repository;
pub mod games_repository;
pub mod purchases_repository;
pub mod users_repository;

use std::sync::atomic::{AtomicU32, Ordering};

static ID_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// 生成记录 ID：毫秒时间戳加进程内序号，同一毫秒内最多 1000 个不重复
pub(crate) fn generate_id() -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1000;
    format!("{}{:03}", chrono::Utc::now().timestamp_millis(), seq)
}

/// 生成交易流水号，形如 TXN8F3K2Q9ZA
pub(crate) fn generate_transaction_key() -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let seq = u64::from(ID_SEQUENCE.fetch_add(1, Ordering::Relaxed));
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .unsigned_abs();
    let mut value = nanos ^ seq.rotate_left(40);

    let mut key = String::from("TXN");
    for _ in 0..9 {
        key.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    key
}

/// 当天日期（UTC，YYYY-MM-DD）
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

fn parse_level(level: &str) -> Result<log::LevelFilter> {
    match level.to_lowercase().as_str() {
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        "off" => Ok(log::LevelFilter::Off),
        other => Err(StoreError::InvalidInput(format!("无效的日志级别: {}", other))),
    }
}

/// 初始化日志输出
///
/// 后端过滤级别固定为 Trace，实际输出级别由 `log::max_level` 控制，
/// 因此运行时可以通过 [`set_log_level`] 调整到任意级别。
/// 重复初始化时仅调整级别。
pub fn init(level: &str) -> Result<()> {
    let initial = parse_level(level)?;

    let installed = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();

    if installed.is_err() {
        log::debug!("日志已初始化，仅调整输出级别");
    }
    log::set_max_level(initial);
    Ok(())
}

/// 动态设置日志输出级别（不持久化）
pub fn set_log_level(level: &str) -> Result<()> {
    let lf = parse_level(level)?;
    log::set_max_level(lf);
    Ok(())
}

/// 获取当前日志级别
pub fn get_log_level() -> LogLevel {
    match log::max_level() {
        log::LevelFilter::Error => LogLevel::Error,
        log::LevelFilter::Warn => LogLevel::Warn,
        log::LevelFilter::Info => LogLevel::Info,
        log::LevelFilter::Debug => LogLevel::Debug,
        log::LevelFilter::Trace => LogLevel::Trace,
        log::LevelFilter::Off => LogLevel::Off,
    }
}

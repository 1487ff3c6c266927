//! 运行配置
//!
//! 配置文件为数据目录下的 config.json，不存在时使用默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsConfig;
use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 自定义数据库文件路径，为空时使用数据目录下的 data/storefront.db
    pub database_path: Option<PathBuf>,
    /// 初始日志级别
    pub log_level: String,
    pub analytics: AnalyticsConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "info".to_string(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl StoreConfig {
    /// 从默认位置加载配置
    pub fn load() -> Result<Self> {
        let path = store_path::get_config_path().map_err(StoreError::Config)?;
        Self::load_from(&path)
    }

    /// 从指定文件加载配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            StoreError::Config(format!("无法解析配置文件 {}: {}", path.display(), e))
        })?;
        config.analytics.validate()?;
        Ok(config)
    }

    /// 解析数据库文件路径
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => store_path::get_db_path().map_err(StoreError::Config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storefront-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("storefront-config-does-not-exist.json");
        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_file(
            "partial.json",
            r#"{"database_path": "/tmp/shop.db", "analytics": {"recent_limit": 3}}"#,
        );
        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analytics.recent_limit, 3);
        assert_eq!(config.analytics.popular_limit, 5);
        assert_eq!(config.resolve_db_path().unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let path = temp_file("broken.json", "{ not json");
        let err = StoreConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn negative_break_even_epsilon_is_rejected() {
        let path = temp_file("negative-epsilon.json", r#"{"analytics": {"break_even_epsilon": -1.0}}"#);
        let err = StoreConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn non_finite_break_even_epsilon_is_rejected() {
        let mut analytics = AnalyticsConfig::default();
        analytics.break_even_epsilon = f64::NAN;
        assert!(matches!(analytics.validate(), Err(StoreError::Config(_))));

        analytics.break_even_epsilon = 0.01;
        assert!(analytics.validate().is_ok());
    }
}

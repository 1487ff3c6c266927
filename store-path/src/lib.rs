use std::path::{Path, PathBuf};

/// 数据相关路径常量
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "storefront.db";
pub const DB_BACKUP_SUBDIR: &str = "backups";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const RESOURCE_DIR: &str = "resources";

/// 判断是否处于便携模式
///
/// 检测逻辑：检查可执行文件同级目录下是否存在 resources/data/storefront.db
pub fn is_portable_mode() -> bool {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let portable_data_dir = exe_dir.join(RESOURCE_DIR).join(DB_DATA_DIR);
            let portable_db_file = portable_data_dir.join(DB_FILE_NAME);
            return portable_data_dir.exists() && portable_db_file.exists();
        }
    }
    false
}

/// 获取基础数据目录
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    get_base_data_dir_for_mode(is_portable_mode())
}

/// 获取指定模式的基础数据目录
pub fn get_base_data_dir_for_mode(portable: bool) -> Result<PathBuf, String> {
    if portable {
        let exe_path =
            std::env::current_exe().map_err(|e| format!("无法获取可执行文件路径: {}", e))?;
        let exe_dir = exe_path
            .parent()
            .ok_or_else(|| "无法获取可执行文件父目录".to_string())?;
        Ok(exe_dir.join(RESOURCE_DIR))
    } else {
        get_system_data_dir()
    }
}

/// 获取系统数据目录（跨平台）
fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("com.gamestorefront.app"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("game-storefront"))
    }
}

/// 基础目录下的数据库文件路径
pub fn db_path_in(base: &Path) -> PathBuf {
    base.join(DB_DATA_DIR).join(DB_FILE_NAME)
}

/// 数据库文件所在目录下的备份目录
pub fn backup_dir_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(parent) => parent.join(DB_BACKUP_SUBDIR),
        None => PathBuf::from(DB_BACKUP_SUBDIR),
    }
}

/// 获取数据库文件路径
pub fn get_db_path() -> Result<PathBuf, String> {
    Ok(db_path_in(&get_base_data_dir()?))
}

/// 获取配置文件路径
pub fn get_config_path() -> Result<PathBuf, String> {
    Ok(get_base_data_dir()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_lives_under_data_dir() {
        let path = db_path_in(Path::new("/srv/store"));
        assert_eq!(path, PathBuf::from("/srv/store/data/storefront.db"));
    }

    #[test]
    fn backups_sit_next_to_database() {
        let db = PathBuf::from("/srv/store/data/storefront.db");
        assert_eq!(backup_dir_for(&db), PathBuf::from("/srv/store/data/backups"));
    }

    #[test]
    fn bare_file_name_backs_up_relative() {
        // "storefront.db".parent() is Some(""), so the backup dir stays relative
        let db = PathBuf::from("storefront.db");
        assert_eq!(backup_dir_for(&db), PathBuf::from("backups"));
    }
}

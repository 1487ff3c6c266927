//! 预导入模块
//!
//! 提供常用类型的快捷导入。

pub use super::comments::Entity as Comments;
pub use super::games::Entity as Games;
pub use super::purchases::Entity as Purchases;
pub use super::users::Entity as Users;

//! 实体（Entity）基础抽象
//!
//! 持久化形状的对象：由映射器从已校验的命令构造，随后由工作单元写入存储。
//!
use std::{fmt::Display, hash::Hash, str::FromStr};

/// 具备唯一标识、归属于某张表的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示、可哈希与可克隆
    type Id: FromStr + Clone + Display + Eq + Hash + Send + Sync;

    /// 实体所在的表名（用于日志与错误信息）
    const TABLE: &'static str;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}

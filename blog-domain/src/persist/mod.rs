//! 持久化（persist）
//!
//! 定义命令处理器直接依赖的两类契约：
//! - 按规约的单条/多条查询（`Repository`）；
//! - 工作单元：暂存待插入行并原子提交（`UnitOfWork`/`DataStore`）。
//!
//! 另提供内存实现（`InMemoryStore`），具体数据库后端由上层提供实现并注入。
//!
mod inmemory;
mod repository;
mod unit_of_work;

pub use inmemory::{InMemoryStore, InMemoryTable, InMemoryUnitOfWork};
pub use repository::{Repository, single_or_none};
pub use unit_of_work::{DataStore, PendingInsert, UnitOfWork};

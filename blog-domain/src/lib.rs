//! 博客领域层（blog-domain）
//!
//! 提供写流程所依赖的领域构件：
//! - 持久化实体与值对象（`model`、`value_object`）
//! - 查询谓词（`specification`）与单条查询（`persist::Repository`）
//! - 工作单元与数据存储契约（`persist::UnitOfWork`、`persist::DataStore`）
//! - 别名生成（`slug`）与配置项读取（`option_accessor`）
//!
//! 本 crate 与具体存储实现解耦，仅内置一个内存实现（`persist::InMemoryStore`）。
//!
pub mod entity;
pub mod error;
pub mod model;
pub mod option_accessor;
pub mod persist;
pub mod slug;
pub mod specification;
pub mod value_object;

// 允许在本 crate 内部通过 ::blog_domain 进行自引用，
// 以便 `#[entity]` 宏展开的路径在本 crate 内也能解析。
extern crate self as blog_domain;

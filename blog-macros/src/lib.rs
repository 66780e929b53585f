//! 博客领域建模宏（blog-macros）
//!
//! - `#[entity]`：持久化实体，补齐 `id` 字段并实现 `Entity`
//! - `#[entity_id]`：强类型标识（tuple struct 包装）
//! - `#[value_object]`：值对象的默认派生集合
//!
use proc_macro::TokenStream;

mod entity;
mod entity_id;
mod utils;
mod value_object;

/// 实体宏
/// - 追加字段：`id: IdType`（若缺失）并置于字段最前
/// - 自动实现 `::blog_domain::entity::Entity`
/// - 支持参数：`#[entity(id = IdType, table = "posts")]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏
/// 用于 `tuple struct` 形式的 ID 类型（例如 `struct PostId(Uuid);`），
/// 生成 `Display`、`FromStr`、`From`、`AsRef` 等实现；
/// `#[entity_id(uuid)]` 额外生成 `generate()` 与 `is_nil()`。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}

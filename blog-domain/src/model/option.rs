use blog_macros::{entity, entity_id, value_object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SiteId;

#[entity_id(uuid)]
pub struct OptionId(Uuid);

/// 配置项键
#[value_object]
#[derive(Copy, Hash)]
pub enum OptionKey {
    /// 博客评论的默认审核策略
    #[default]
    CommentBlog,
}

/// 配置项取值
#[value_object]
#[derive(Copy, Hash)]
pub enum OptionValue {
    CommentApproved,
    #[default]
    CommentNotApproved,
}

/// 站点级配置项（请求时读取）
#[entity(id = OptionId, table = "options")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogOption {
    pub key: OptionKey,
    pub value: OptionValue,
    pub description: String,
    pub site_id: SiteId,
}

impl BlogOption {
    pub fn new(site_id: SiteId, key: OptionKey, value: OptionValue) -> Self {
        Self {
            id: OptionId::generate(),
            key,
            value,
            description: String::new(),
            site_id,
        }
    }
}

use blog_macros::{entity, entity_id, value_object};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PostId, SiteId};

#[entity_id(uuid)]
pub struct CommentId(Uuid);

/// 评论元数据
#[value_object]
pub struct Commentmeta {
    pub meta_key: String,
    pub meta_value: String,
}

/// 评论
#[entity(id = CommentId, table = "comments")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    pub site_id: SiteId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub approved: bool,
    pub commentmetas: Vec<Commentmeta>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

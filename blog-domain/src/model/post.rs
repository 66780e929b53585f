use blog_macros::{entity, entity_id, value_object};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttachmentId, SiteId};
use crate::value_object::Slug;

#[entity_id(uuid)]
pub struct PostId(Uuid);

#[entity_id(uuid)]
pub struct TaxonomyId(Uuid);

/// 文章发布状态
#[value_object]
#[derive(Copy, Hash)]
pub enum PostStatus {
    Publish,
    #[default]
    Draft,
    Pending,
    Private,
    Future,
}

/// 文章类型
#[value_object]
#[derive(Copy, Hash)]
pub enum PostType {
    #[default]
    Standard,
    Page,
    Gallery,
    Video,
    Audio,
}

/// 文章与附件的关联（仅持有附件 id）
#[value_object]
pub struct PostAttachment {
    pub attachment_id: AttachmentId,
    pub is_main: bool,
}

/// 文章与分类/标签的关联（仅持有分类 id）
#[value_object]
pub struct TaxonomyPost {
    pub taxonomy_id: TaxonomyId,
}

/// 文章元数据
#[value_object]
pub struct Postmeta {
    pub meta_key: String,
    pub meta_value: String,
}

/// 文章
#[entity(id = PostId, table = "posts")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub site_id: SiteId,
    pub title: String,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub slug: Slug,
    pub post_status: PostStatus,
    pub comment_allowed: bool,
    pub order: i32,
    pub view_count: i32,
    pub post_type: PostType,
    pub is_pinned: bool,
    pub pin_order: i32,
    pub parent_id: Option<PostId>,
    pub post_attachments: Vec<PostAttachment>,
    pub taxonomy_posts: Vec<TaxonomyPost>,
    pub postmetas: Vec<Postmeta>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::lookup;
use crate::mapper::MapFrom;
use crate::pipeline::{CreateOperation, CreatePipeline};
use crate::validation::{Rule, Validate, ValidationErrors};
use async_trait::async_trait;
use blog_domain::model::{
    Post, PostAttachment, PostId, PostStatus, PostType, Postmeta, Site, TaxonomyPost,
};
use blog_domain::persist::{DataStore, Repository};
use blog_domain::slug::SlugGenerator;
use blog_domain::specification::Predicate;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 标题字符数上限
pub const TITLE_MAX_CHARS: usize = 150;

/// 新建文章
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    /// 为空时由标题生成
    pub slug: Option<String>,
    pub post_status: Option<PostStatus>,
    #[serde(default)]
    pub comment_allowed: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub view_count: i32,
    pub post_type: Option<PostType>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub pin_order: i32,
    #[serde(default)]
    pub post_attachments: Vec<PostAttachment>,
    pub parent_id: Option<PostId>,
    #[serde(default)]
    pub taxonomy_posts: Vec<TaxonomyPost>,
    #[serde(default)]
    pub postmetas: Vec<Postmeta>,
}

impl Command for CreatePost {
    const NAME: &'static str = "post.create";
}

impl Validate for CreatePost {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .not_empty("title", &self.title)
            .max_length("title", &self.title, TITLE_MAX_CHARS)
            .not_empty("content", &self.content)
            .required("post_status", &self.post_status)
            .required("post_type", &self.post_type);
        errors
    }
}

impl MapFrom<CreatePost> for Post {
    fn map_from(source: &CreatePost) -> Self {
        Post {
            title: source.title.clone(),
            subtitle: source.subtitle.clone(),
            excerpt: source.excerpt.clone(),
            content: source.content.clone(),
            post_status: source.post_status.unwrap_or_default(),
            comment_allowed: source.comment_allowed,
            order: source.order,
            view_count: source.view_count,
            post_type: source.post_type.unwrap_or_default(),
            is_pinned: source.is_pinned,
            pin_order: source.pin_order,
            parent_id: source.parent_id,
            post_attachments: source.post_attachments.clone(),
            taxonomy_posts: source.taxonomy_posts.clone(),
            postmetas: source.postmetas.clone(),
            ..Default::default()
        }
    }
}

/// 文章写入所需的引用
#[derive(Debug)]
pub struct PostRefs {
    pub site: Site,
}

pub struct CreatePostHandler<S> {
    pipeline: CreatePipeline<S>,
    store: Arc<S>,
    slugs: Arc<dyn SlugGenerator>,
}

impl<S> CreatePostHandler<S>
where
    S: DataStore,
{
    pub fn new(store: Arc<S>, slugs: Arc<dyn SlugGenerator>) -> Self {
        Self {
            pipeline: CreatePipeline::new(Arc::clone(&store)),
            store,
            slugs,
        }
    }
}

/// 别名来源：显式别名（非空白）优先，否则取标题
fn slug_source(cmd: &CreatePost) -> &str {
    match cmd.slug.as_deref() {
        Some(slug) if !slug.trim().is_empty() => slug,
        _ => &cmd.title,
    }
}

#[async_trait]
impl<S> CreateOperation for CreatePostHandler<S>
where
    S: DataStore,
{
    type Command = CreatePost;
    type Entity = Post;
    type Resolved = PostRefs;

    async fn resolve(&self, _ctx: &AppContext, cmd: &CreatePost) -> Result<PostRefs, AppError> {
        let title = cmd.title.clone();
        let same_title = Predicate(move |p: &Post| p.title == title);
        if Repository::<Post>::find_single(self.store.as_ref(), &same_title)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict {
                field: "title",
                message: "duplicate title is not allowed".into(),
            });
        }

        let site = lookup::blog_site(self.store.as_ref()).await?;

        if let Some(parent_id) = &cmd.parent_id {
            let parent = Repository::<Post>::find_by_id(self.store.as_ref(), parent_id).await?;
            if parent.is_none() {
                return Err(ValidationErrors::single(
                    "parent_id",
                    Rule::InvalidReference,
                    format!("parent post {parent_id} does not exist"),
                )
                .into());
            }
        }

        Ok(PostRefs { site })
    }

    fn derive(&self, ctx: &AppContext, cmd: &CreatePost, refs: PostRefs, post: &mut Post) {
        post.id = PostId::generate();
        post.site_id = refs.site.id;
        post.slug = self.slugs.generate_slug(slug_source(cmd));
        post.created_at = Utc::now();
        post.created_by = ctx.biz.actor_id().map(str::to_string);
    }
}

#[async_trait]
impl<S> CommandHandler<CreatePost> for CreatePostHandler<S>
where
    S: DataStore,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreatePost) -> Result<(), AppError> {
        self.pipeline.execute(self, ctx, cmd).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_domain::value_object::Slug;

    fn valid() -> CreatePost {
        CreatePost {
            title: "Hello".into(),
            content: "Body".into(),
            post_status: Some(PostStatus::Publish),
            post_type: Some(PostType::Standard),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn test_title_length_boundary() {
        let mut cmd = valid();
        cmd.title = "t".repeat(TITLE_MAX_CHARS);
        assert!(cmd.validate().is_empty());

        cmd.title = "t".repeat(TITLE_MAX_CHARS + 1);
        let errors = cmd.validate();
        assert_eq!(
            errors.rules_for("title"),
            vec![Rule::MaxLength {
                max: TITLE_MAX_CHARS
            }]
        );
    }

    #[test]
    fn test_missing_status_and_type_are_required() {
        let cmd = CreatePost {
            post_status: None,
            post_type: None,
            ..valid()
        };
        let errors = cmd.validate();
        assert_eq!(errors.rules_for("post_status"), vec![Rule::Required]);
        assert_eq!(errors.rules_for("post_type"), vec![Rule::Required]);
    }

    #[test]
    fn test_mapping_skips_slug_and_derived_fields() {
        let cmd = CreatePost {
            slug: Some("custom".into()),
            is_pinned: true,
            pin_order: 3,
            post_type: Some(PostType::Gallery),
            ..valid()
        };
        let post = Post::map_from(&cmd);

        assert_eq!(post.title, "Hello");
        assert_eq!(post.post_status, PostStatus::Publish);
        assert_eq!(post.post_type, PostType::Gallery);
        assert!(post.is_pinned);
        assert_eq!(post.pin_order, 3);
        assert_eq!(post.slug, Slug::default());
        assert!(post.id.is_nil());
        assert!(post.site_id.is_nil());
    }

    #[test]
    fn test_slug_source_prefers_non_blank_explicit_slug() {
        let mut cmd = valid();
        assert_eq!(slug_source(&cmd), "Hello");

        cmd.slug = Some("   ".into());
        assert_eq!(slug_source(&cmd), "Hello");

        cmd.slug = Some("My Slug".into());
        assert_eq!(slug_source(&cmd), "My Slug");
    }
}

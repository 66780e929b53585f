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
    Comment, CommentId, Commentmeta, OptionKey, OptionValue, Post, PostId, Site,
};
use blog_domain::option_accessor::OptionAccessor;
use blog_domain::persist::{DataStore, Repository};
use blog_domain::specification::{Predicate, Specification};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 发表评论
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub parent_id: Option<CommentId>,
    pub post_id: PostId,
    #[serde(default)]
    pub commentmetas: Vec<Commentmeta>,
}

impl Command for CreateComment {
    const NAME: &'static str = "comment.create";
}

impl Validate for CreateComment {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .not_empty("content", &self.content)
            .not_nil("post_id", self.post_id.is_nil());
        errors
    }
}

impl MapFrom<CreateComment> for Comment {
    fn map_from(source: &CreateComment) -> Self {
        Comment {
            content: source.content.clone(),
            parent_id: source.parent_id,
            post_id: source.post_id,
            commentmetas: source.commentmetas.clone(),
            ..Default::default()
        }
    }
}

/// 评论写入所需的引用
#[derive(Debug)]
pub struct CommentRefs {
    pub site: Site,
    pub approved: bool,
}

pub struct CreateCommentHandler<S> {
    pipeline: CreatePipeline<S>,
    store: Arc<S>,
    options: Arc<dyn OptionAccessor>,
}

impl<S> CreateCommentHandler<S>
where
    S: DataStore,
{
    pub fn new(store: Arc<S>, options: Arc<dyn OptionAccessor>) -> Self {
        Self {
            pipeline: CreatePipeline::new(Arc::clone(&store)),
            store,
            options,
        }
    }

    /// 评论默认是否免审：由 `CommentBlog` 配置项决定，缺失时进入待审核
    async fn default_approval(&self) -> Result<bool, AppError> {
        match self.options.get_option_by_key(OptionKey::CommentBlog).await? {
            Some(option) => Ok(option.value == OptionValue::CommentApproved),
            None => {
                tracing::warn!(
                    key = ?OptionKey::CommentBlog,
                    "option missing, comment left unapproved"
                );
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl<S> CreateOperation for CreateCommentHandler<S>
where
    S: DataStore,
{
    type Command = CreateComment;
    type Entity = Comment;
    type Resolved = CommentRefs;

    async fn resolve(
        &self,
        _ctx: &AppContext,
        cmd: &CreateComment,
    ) -> Result<CommentRefs, AppError> {
        let approved = self.default_approval().await?;
        let site = lookup::blog_site(self.store.as_ref()).await?;

        if Repository::<Post>::find_by_id(self.store.as_ref(), &cmd.post_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "post",
                format!("post {} does not exist", cmd.post_id),
            ));
        }

        if let Some(parent_id) = cmd.parent_id {
            let post_id = cmd.post_id;
            let reply_target = Predicate(move |c: &Comment| c.id == parent_id)
                .and(Predicate(move |c: &Comment| c.post_id == post_id));
            let parent =
                Repository::<Comment>::find_single(self.store.as_ref(), &reply_target).await?;
            if parent.is_none() {
                return Err(ValidationErrors::single(
                    "parent_id",
                    Rule::InvalidReference,
                    format!("parent comment {parent_id} does not exist on this post"),
                )
                .into());
            }
        }

        Ok(CommentRefs { site, approved })
    }

    fn derive(
        &self,
        ctx: &AppContext,
        _cmd: &CreateComment,
        refs: CommentRefs,
        comment: &mut Comment,
    ) {
        comment.id = CommentId::generate();
        comment.site_id = refs.site.id;
        comment.approved = refs.approved;
        comment.created_at = Utc::now();
        comment.created_by = ctx.biz.actor_id().map(str::to_string);
    }
}

#[async_trait]
impl<S> CommandHandler<CreateComment> for CreateCommentHandler<S>
where
    S: DataStore,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreateComment) -> Result<(), AppError> {
        self.pipeline.execute(self, ctx, cmd).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_and_nil_post_are_both_reported() {
        let cmd = CreateComment::default();
        let errors = cmd.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.rules_for("content"), vec![Rule::NotEmpty]);
        assert_eq!(errors.rules_for("post_id"), vec![Rule::NotEmpty]);
    }

    #[test]
    fn test_mapping_copies_fields_and_leaves_derived_ones_default() {
        let cmd = CreateComment {
            content: "Nice!".into(),
            parent_id: Some(CommentId::generate()),
            post_id: PostId::generate(),
            commentmetas: vec![Commentmeta {
                meta_key: "ip".into(),
                meta_value: "127.0.0.1".into(),
            }],
        };
        let comment = Comment::map_from(&cmd);

        assert_eq!(comment.content, "Nice!");
        assert_eq!(comment.post_id, cmd.post_id);
        assert_eq!(comment.parent_id, cmd.parent_id);
        assert_eq!(comment.commentmetas, cmd.commentmetas);
        assert!(comment.id.is_nil());
        assert!(comment.site_id.is_nil());
        assert!(!comment.approved);
    }
}

mod config;

use crate::config::DemoConfig;
use blog_application::attachment::{AddAttachment, FileUploadResult};
use blog_application::comment::CreateComment;
use blog_application::context::{AppContext, BusinessContext};
use blog_application::post::CreatePost;
use blog_application::{BlogCommand, CommandBus, InMemoryCommandBus};
use blog_domain::model::{
    AttachmentType, BlogOption, Comment, OptionKey, Post, PostStatus, PostType, Site, SiteType,
};
use blog_domain::persist::{InMemoryStore, Repository};
use blog_domain::specification::Predicate;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = DemoConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter.0))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(InMemoryStore::new());
    let site = Site::new(SiteType::Blog, &cfg.seed.site_name, &cfg.seed.site_domain);
    store.seed(BlogOption::new(
        site.id,
        OptionKey::CommentBlog,
        cfg.seed.comment_moderation.into(),
    ));
    store.seed(site);

    let bus = InMemoryCommandBus::for_store(Arc::clone(&store));
    let ctx = AppContext {
        biz: BusinessContext::builder()
            .correlation_id("demo-1".to_string())
            .actor_type("user".to_string())
            .actor_id("admin".to_string())
            .build(),
        ..Default::default()
    };

    let first = CreatePost {
        title: "Hello, World!".into(),
        content: "The first post.".into(),
        post_status: Some(PostStatus::Publish),
        post_type: Some(PostType::Standard),
        comment_allowed: true,
        ..Default::default()
    };
    let commands: Vec<BlogCommand> = vec![
        first.clone().into(),
        // 重复标题
        first.into(),
        // 缺少必填项
        CreatePost {
            title: "Draft without a type".into(),
            content: "...".into(),
            ..Default::default()
        }
        .into(),
        AddAttachment {
            upload: FileUploadResult {
                attachment_type: AttachmentType::Photo,
                file_name: "4f1c.jpg".into(),
                public_file_name: "cover.jpg".into(),
                path: "/uploads/4f1c.jpg".into(),
                file_size: 18_432,
                mime_type: "image/jpeg".into(),
                ..Default::default()
            },
            is_main: true,
        }
        .into(),
    ];

    for cmd in commands {
        report(&bus, &ctx, cmd).await;
    }

    let hello = Predicate(|p: &Post| p.title == "Hello, World!");
    if let Some(post) = Repository::<Post>::find_single(store.as_ref(), &hello).await? {
        tracing::info!(id = %post.id, slug = %post.slug, "post stored");

        let comment = CreateComment {
            content: "Nice!".into(),
            post_id: post.id,
            ..Default::default()
        };
        report(&bus, &ctx, comment.into()).await;

        let on_post = Predicate(move |c: &Comment| c.post_id == post.id);
        for comment in Repository::<Comment>::find_all(store.as_ref(), &on_post).await? {
            tracing::info!(id = %comment.id, approved = comment.approved, "comment stored");
        }
    }

    Ok(())
}

async fn report(bus: &InMemoryCommandBus, ctx: &AppContext, cmd: BlogCommand) {
    let name = cmd.name();
    match bus.dispatch(ctx, cmd).await {
        Ok(()) => tracing::info!(command = name, "ok"),
        Err(err) => {
            let detail = err
                .detail()
                .and_then(|d| serde_json::to_string(&d).ok())
                .unwrap_or_default();
            tracing::info!(command = name, kind = ?err.kind(), %err, %detail, "rejected");
        }
    }
}

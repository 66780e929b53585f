use crate::attachment::{AddAttachment, AddAttachmentHandler};
use crate::comment::{CreateComment, CreateCommentHandler};
use crate::post::{CreatePost, CreatePostHandler};
use crate::{
    command::Command, command_bus::BlogCommand, command_bus::CommandBus,
    command_handler::CommandHandler, context::AppContext, error::AppError,
};
use async_trait::async_trait;
use blog_domain::option_accessor::StoreOptionAccessor;
use blog_domain::persist::DataStore;
use blog_domain::slug::DefaultSlugGenerator;
use bon::Builder;
use std::sync::Arc;

/// 进程内 CommandBus 实现
///
/// 每种命令最多对应一个处理器；未注册的命令返回 [`AppError::HandlerNotFound`]。
#[derive(Builder, Default, Clone)]
pub struct InMemoryCommandBus {
    create_post: Option<Arc<dyn CommandHandler<CreatePost>>>,
    create_comment: Option<Arc<dyn CommandHandler<CreateComment>>>,
    add_attachment: Option<Arc<dyn CommandHandler<AddAttachment>>>,
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以默认依赖为同一存储装配全部处理器
    pub fn for_store<S>(store: Arc<S>) -> Self
    where
        S: DataStore,
    {
        let options = Arc::new(StoreOptionAccessor::new(Arc::clone(&store)));
        let slugs = Arc::new(DefaultSlugGenerator::default());

        Self::builder()
            .create_post(Arc::new(CreatePostHandler::new(Arc::clone(&store), slugs)))
            .create_comment(Arc::new(CreateCommentHandler::new(
                Arc::clone(&store),
                options,
            )))
            .add_attachment(Arc::new(AddAttachmentHandler::new(store)))
            .build()
    }
}

async fn route<C>(
    handler: &Option<Arc<dyn CommandHandler<C>>>,
    ctx: &AppContext,
    cmd: C,
) -> Result<(), AppError>
where
    C: Command,
{
    let Some(handler) = handler else {
        tracing::error!(command = C::NAME, "no handler registered");
        return Err(AppError::HandlerNotFound(C::NAME));
    };
    handler.handle(ctx, cmd).await
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch(&self, ctx: &AppContext, cmd: BlogCommand) -> Result<(), AppError> {
        match cmd {
            BlogCommand::CreatePost(cmd) => route(&self.create_post, ctx, cmd).await,
            BlogCommand::CreateComment(cmd) => route(&self.create_comment, ctx, cmd).await,
            BlogCommand::AddAttachment(cmd) => route(&self.add_attachment, ctx, cmd).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CommandHandler<CreateComment> for CountingHandler {
        async fn handle(&self, _ctx: &AppContext, _cmd: CreateComment) -> Result<(), AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_variant() {
        let handler = Arc::new(CountingHandler::default());
        let bus = InMemoryCommandBus::builder()
            .create_comment(handler.clone() as Arc<dyn CommandHandler<CreateComment>>)
            .build();

        bus.dispatch(&AppContext::default(), CreateComment::default().into())
            .await
            .unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_handler() {
        let bus = InMemoryCommandBus::new();
        let err = bus
            .dispatch(&AppContext::default(), CreatePost::default().into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::HandlerNotFound("post.create")));
    }
}

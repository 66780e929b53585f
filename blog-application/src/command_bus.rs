use crate::attachment::AddAttachment;
use crate::command::Command;
use crate::comment::CreateComment;
use crate::post::CreatePost;
use crate::{context::AppContext, error::AppError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 全部可分发的命令
///
/// 以封闭枚举表达命令种类，分发在编译期即可穷尽检查。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum BlogCommand {
    CreatePost(CreatePost),
    CreateComment(CreateComment),
    AddAttachment(AddAttachment),
}

impl BlogCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BlogCommand::CreatePost(_) => CreatePost::NAME,
            BlogCommand::CreateComment(_) => CreateComment::NAME,
            BlogCommand::AddAttachment(_) => AddAttachment::NAME,
        }
    }
}

impl From<CreatePost> for BlogCommand {
    fn from(cmd: CreatePost) -> Self {
        BlogCommand::CreatePost(cmd)
    }
}

impl From<CreateComment> for BlogCommand {
    fn from(cmd: CreateComment) -> Self {
        BlogCommand::CreateComment(cmd)
    }
}

impl From<AddAttachment> for BlogCommand {
    fn from(cmd: AddAttachment) -> Self {
        BlogCommand::AddAttachment(cmd)
    }
}

/// 命令总线（Command Bus）
///
/// - 负责根据命令种类路由到对应的处理器；
/// - 框架可提供不同实现（如进程内、消息队列等）。
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// 分发命令到对应处理器
    ///
    /// - `ctx`：应用上下文（链路追踪、幂等键、取消信号）
    /// - `cmd`：具体命令实例
    async fn dispatch(&self, ctx: &AppContext, cmd: BlogCommand) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_variant() {
        assert_eq!(BlogCommand::from(CreatePost::default()).name(), "post.create");
        assert_eq!(
            BlogCommand::from(CreateComment::default()).name(),
            "comment.create"
        );
        assert_eq!(
            BlogCommand::from(AddAttachment::default()).name(),
            "attachment.add"
        );
    }

    #[test]
    fn test_wire_shape_is_tagged() {
        let cmd = BlogCommand::from(CreateComment {
            content: "hi".into(),
            ..Default::default()
        });
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "create_comment");
        assert_eq!(json["payload"]["content"], "hi");

        let back: BlogCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back.name(), CreateComment::NAME);
    }
}

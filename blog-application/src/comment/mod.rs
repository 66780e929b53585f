//! 评论写操作
mod create;

pub use create::{CommentRefs, CreateComment, CreateCommentHandler};

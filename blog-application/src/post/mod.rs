//! 文章写操作
mod create;

pub use create::{CreatePost, CreatePostHandler, PostRefs, TITLE_MAX_CHARS};

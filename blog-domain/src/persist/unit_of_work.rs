//! 持久化网关（Persistence Gateway）
//!
//! 工作单元暂存一次请求内的待插入行，`commit` 原子地写入全部暂存行并返回影响行数。
//!
use crate::entity::Entity;
use crate::error::DomainResult;
use crate::model::{Attachment, BlogOption, Comment, Post, Site};
use crate::persist::Repository;
use async_trait::async_trait;

/// 一条待插入的行
#[derive(Debug, Clone)]
pub enum PendingInsert {
    Post(Post),
    Comment(Comment),
    Attachment(Attachment),
}

impl PendingInsert {
    /// 目标表名
    pub fn table(&self) -> &'static str {
        match self {
            Self::Post(_) => Post::TABLE,
            Self::Comment(_) => Comment::TABLE,
            Self::Attachment(_) => Attachment::TABLE,
        }
    }

    /// 行主键的文本形式
    pub fn key(&self) -> String {
        match self {
            Self::Post(p) => p.id.to_string(),
            Self::Comment(c) => c.id.to_string(),
            Self::Attachment(a) => a.id.to_string(),
        }
    }
}

impl From<Post> for PendingInsert {
    fn from(value: Post) -> Self {
        Self::Post(value)
    }
}

impl From<Comment> for PendingInsert {
    fn from(value: Comment) -> Self {
        Self::Comment(value)
    }
}

impl From<Attachment> for PendingInsert {
    fn from(value: Attachment) -> Self {
        Self::Attachment(value)
    }
}

/// 工作单元：生命周期为一次请求
#[async_trait]
pub trait UnitOfWork: Send {
    /// 暂存一条待插入行
    fn add(&mut self, insert: PendingInsert);

    /// 当前暂存的行数
    fn pending(&self) -> usize;

    /// 原子提交全部暂存行，返回影响行数；提交后暂存区清空
    async fn commit(&mut self) -> DomainResult<usize>;
}

/// 数据存储：单条查询 + 开启工作单元
pub trait DataStore:
    Repository<Site>
    + Repository<BlogOption>
    + Repository<Post>
    + Repository<Comment>
    + Repository<Attachment>
    + Send
    + Sync
    + 'static
{
    type UnitOfWork: UnitOfWork;

    /// 开启一个新的工作单元
    fn begin(&self) -> Self::UnitOfWork;
}

//! 基于内存的数据存储
//!
//! 每个实体一张按主键索引的表（`DashMap`），工作单元在提交时整体写入。
//! 适用于测试、示例与单进程部署。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::model::{
    Attachment, AttachmentId, BlogOption, Comment, CommentId, OptionId, Post, PostId, Site,
    SiteId,
};
use crate::persist::{DataStore, PendingInsert, Repository, UnitOfWork};
use crate::specification::Specification;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Tables {
    sites: DashMap<SiteId, Site>,
    options: DashMap<OptionId, BlogOption>,
    posts: DashMap<PostId, Post>,
    comments: DashMap<CommentId, Comment>,
    attachments: DashMap<AttachmentId, Attachment>,
    // 串行化提交，保证一批插入整体可见
    commit_lock: Mutex<()>,
}

/// 内存数据存储（可廉价克隆，克隆体共享同一份数据）
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
}

/// 按实体类型取得对应的内存表
pub trait InMemoryTable<T: Entity> {
    fn table(&self) -> &DashMap<T::Id, T>;
}

macro_rules! in_memory_table {
    ($entity:ty, $field:ident) => {
        impl InMemoryTable<$entity> for InMemoryStore {
            fn table(&self) -> &DashMap<<$entity as Entity>::Id, $entity> {
                &self.tables.$field
            }
        }
    };
}

in_memory_table!(Site, sites);
in_memory_table!(BlogOption, options);
in_memory_table!(Post, posts);
in_memory_table!(Comment, comments);
in_memory_table!(Attachment, attachments);

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入一行（绕过工作单元），用于初始化数据与测试夹具
    pub fn seed<T>(&self, row: T)
    where
        T: Entity + 'static,
        Self: InMemoryTable<T>,
    {
        InMemoryTable::<T>::table(self).insert(row.id().clone(), row);
    }

    /// 某张表当前的行数
    pub fn count<T>(&self) -> usize
    where
        T: Entity + 'static,
        Self: InMemoryTable<T>,
    {
        InMemoryTable::<T>::table(self).len()
    }

    fn contains(&self, row: &PendingInsert) -> bool {
        match row {
            PendingInsert::Post(p) => self.tables.posts.contains_key(&p.id),
            PendingInsert::Comment(c) => self.tables.comments.contains_key(&c.id),
            PendingInsert::Attachment(a) => self.tables.attachments.contains_key(&a.id),
        }
    }

    /// 原子写入一批行：任一主键冲突则整批拒绝
    fn apply(&self, batch: Vec<PendingInsert>) -> DomainResult<usize> {
        let _guard = self
            .tables
            .commit_lock
            .lock()
            .map_err(|e| DomainError::Repository {
                reason: format!("commit lock poisoned: {e}"),
            })?;

        let mut seen = HashSet::with_capacity(batch.len());
        for row in &batch {
            if !seen.insert((row.table(), row.key())) || self.contains(row) {
                return Err(DomainError::DuplicateKey {
                    table: row.table(),
                    id: row.key(),
                });
            }
        }

        let affected = batch.len();
        for row in batch {
            match row {
                PendingInsert::Post(p) => {
                    self.tables.posts.insert(p.id, p);
                }
                PendingInsert::Comment(c) => {
                    self.tables.comments.insert(c.id, c);
                }
                PendingInsert::Attachment(a) => {
                    self.tables.attachments.insert(a.id, a);
                }
            }
        }

        Ok(affected)
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryStore
where
    T: Entity + Clone + 'static,
    Self: InMemoryTable<T>,
{
    async fn find_all(&self, spec: &dyn Specification<T>) -> DomainResult<Vec<T>> {
        Ok(InMemoryTable::<T>::table(self)
            .iter()
            .filter(|row| spec.is_satisfied_by(row.value()))
            .map(|row| row.value().clone())
            .collect())
    }

    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>> {
        Ok(InMemoryTable::<T>::table(self)
            .get(id)
            .map(|row| row.value().clone()))
    }
}

impl DataStore for InMemoryStore {
    type UnitOfWork = InMemoryUnitOfWork;

    fn begin(&self) -> Self::UnitOfWork {
        InMemoryUnitOfWork {
            store: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// 内存工作单元
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    pending: Vec<PendingInsert>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn add(&mut self, insert: PendingInsert) {
        tracing::trace!(table = insert.table(), id = %insert.key(), "staged insert");
        self.pending.push(insert);
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    async fn commit(&mut self) -> DomainResult<usize> {
        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(0);
        }
        let affected = self.store.apply(batch)?;
        tracing::debug!(affected, "in-memory commit applied");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SiteType;
    use crate::persist::single_or_none;
    use crate::specification::Predicate;

    fn post(title: &str) -> Post {
        Post {
            id: PostId::generate(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn find_single_returns_none_one_or_integrity_error() {
        let store = InMemoryStore::new();
        let blog = Predicate(|s: &Site| s.site_type == SiteType::Blog);

        let none = Repository::<Site>::find_single(&store, &blog).await.unwrap();
        assert!(none.is_none());

        store.seed(Site::new(SiteType::Blog, "blog", "example.com"));
        let one = Repository::<Site>::find_single(&store, &blog).await.unwrap();
        assert_eq!(one.map(|s| s.name), Some("blog".to_string()));

        store.seed(Site::new(SiteType::Blog, "another", "example.org"));
        let err = Repository::<Site>::find_single(&store, &blog)
            .await
            .unwrap_err();
        match err {
            DomainError::MultipleMatches { table, matched } => {
                assert_eq!(table, "sites");
                assert_eq!(matched, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn commit_inserts_all_pending_rows() {
        let store = InMemoryStore::new();
        let mut uow = store.begin();
        uow.add(post("a").into());
        uow.add(post("b").into());
        assert_eq!(uow.pending(), 2);
        assert_eq!(store.count::<Post>(), 0);

        assert_eq!(uow.commit().await.unwrap(), 2);
        assert_eq!(uow.pending(), 0);
        assert_eq!(store.count::<Post>(), 2);
    }

    #[tokio::test]
    async fn empty_commit_affects_nothing() {
        let store = InMemoryStore::new();
        let mut uow = store.begin();
        assert_eq!(uow.commit().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_key_rejects_whole_batch() {
        let store = InMemoryStore::new();
        let existing = post("existing");
        store.seed(existing.clone());

        let mut uow = store.begin();
        uow.add(post("fresh").into());
        uow.add(existing.into());

        let err = uow.commit().await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateKey { table: "posts", .. }));
        assert_eq!(store.count::<Post>(), 1);
    }

    #[test]
    fn single_or_none_on_plain_vec() {
        assert!(single_or_none(Vec::<Post>::new()).unwrap().is_none());
        assert!(single_or_none(vec![post("x")]).unwrap().is_some());
        assert!(single_or_none(vec![post("x"), post("y")]).is_err());
    }
}

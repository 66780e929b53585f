//! 配置项读取
//!
use crate::error::DomainResult;
use crate::model::{BlogOption, OptionKey};
use crate::persist::Repository;
use crate::specification::Predicate;
use async_trait::async_trait;
use std::sync::Arc;

/// 按键读取站点配置项
#[async_trait]
pub trait OptionAccessor: Send + Sync {
    async fn get_option_by_key(&self, key: OptionKey) -> DomainResult<Option<BlogOption>>;
}

/// 基于仓储的配置项读取
pub struct StoreOptionAccessor<R> {
    repo: Arc<R>,
}

impl<R> StoreOptionAccessor<R>
where
    R: Repository<BlogOption>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> OptionAccessor for StoreOptionAccessor<R>
where
    R: Repository<BlogOption>,
{
    async fn get_option_by_key(&self, key: OptionKey) -> DomainResult<Option<BlogOption>> {
        let by_key = Predicate(move |o: &BlogOption| o.key == key);
        Repository::<BlogOption>::find_single(self.repo.as_ref(), &by_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::model::{OptionValue, SiteId};
    use crate::persist::InMemoryStore;

    #[tokio::test]
    async fn reads_option_by_key() {
        let store = Arc::new(InMemoryStore::new());
        let accessor = StoreOptionAccessor::new(Arc::clone(&store));
        assert!(
            accessor
                .get_option_by_key(OptionKey::CommentBlog)
                .await
                .unwrap()
                .is_none()
        );

        store.seed(BlogOption::new(
            SiteId::generate(),
            OptionKey::CommentBlog,
            OptionValue::CommentApproved,
        ));
        let opt = accessor
            .get_option_by_key(OptionKey::CommentBlog)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(opt.value, OptionValue::CommentApproved);
    }

    #[tokio::test]
    async fn duplicated_key_is_an_integrity_error() {
        let store = Arc::new(InMemoryStore::new());
        let site = SiteId::generate();
        store.seed(BlogOption::new(site, OptionKey::CommentBlog, OptionValue::CommentApproved));
        store.seed(BlogOption::new(site, OptionKey::CommentBlog, OptionValue::CommentNotApproved));

        let accessor = StoreOptionAccessor::new(store);
        let err = accessor
            .get_option_by_key(OptionKey::CommentBlog)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MultipleMatches { table: "options", matched: 2 }));
    }
}

//! 查找解析（Lookup Resolver）
//!
//! 按规约查询实体；`find_single` 保证“至多一条”，命中多条视为数据缺陷，
//! 直接失败而不是任选其一。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::specification::Specification;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + 'static,
{
    /// 返回所有满足规约的记录
    async fn find_all(&self, spec: &dyn Specification<T>) -> DomainResult<Vec<T>>;

    /// 按主键查找
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// 返回唯一满足规约的记录；无匹配返回 `None`，多条匹配返回
    /// [`DomainError::MultipleMatches`]
    async fn find_single(&self, spec: &dyn Specification<T>) -> DomainResult<Option<T>> {
        let matches = self.find_all(spec).await?;
        single_or_none(matches)
    }
}

#[async_trait]
impl<T, R> Repository<T> for Arc<R>
where
    T: Entity + 'static,
    R: Repository<T> + ?Sized,
{
    async fn find_all(&self, spec: &dyn Specification<T>) -> DomainResult<Vec<T>> {
        (**self).find_all(spec).await
    }

    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>> {
        (**self).find_by_id(id).await
    }

    async fn find_single(&self, spec: &dyn Specification<T>) -> DomainResult<Option<T>> {
        (**self).find_single(spec).await
    }
}

/// 将查询结果收敛为“至多一条”
pub fn single_or_none<T: Entity>(mut matches: Vec<T>) -> DomainResult<Option<T>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        matched => {
            tracing::error!(table = T::TABLE, matched, "single-match lookup hit multiple rows");
            Err(DomainError::MultipleMatches {
                table: T::TABLE,
                matched,
            })
        }
    }
}

//! 写流程共用的引用查找
//!
use crate::error::AppError;
use blog_domain::model::{Site, SiteType};
use blog_domain::persist::Repository;
use blog_domain::specification::Predicate;

/// 查找唯一的博客站点；不存在时视为配置缺失
pub async fn blog_site<R>(repo: &R) -> Result<Site, AppError>
where
    R: Repository<Site> + ?Sized,
{
    let is_blog = Predicate(|s: &Site| s.site_type == SiteType::Blog);
    Repository::<Site>::find_single(repo, &is_blog)
        .await?
        .ok_or_else(|| AppError::not_found("site", "no blog site is configured"))
}

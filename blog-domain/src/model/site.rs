use blog_macros::{entity, entity_id, value_object};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[entity_id(uuid)]
pub struct SiteId(Uuid);

/// 站点类型：系统中每种类型至多存在一个站点
#[value_object]
#[derive(Copy, Hash)]
pub enum SiteType {
    #[default]
    Blog,
    Store,
    Lms,
    Zone,
}

/// 站点（只读引用，由命令处理器查找，不会在写流程中创建）
#[entity(id = SiteId, table = "sites")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub site_type: SiteType,
    pub name: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
}

impl Site {
    pub fn new(site_type: SiteType, name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: SiteId::generate(),
            site_type,
            name: name.into(),
            domain: domain.into(),
            created_at: Utc::now(),
        }
    }
}

use blog_macros::{entity, entity_id, value_object};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SiteId;

#[entity_id(uuid)]
pub struct AttachmentId(Uuid);

#[value_object]
#[derive(Copy, Hash)]
pub enum AttachmentType {
    Photo,
    Video,
    Audio,
    Pdf,
    TextFile,
    Compressed,
    #[default]
    Other,
}

/// 文件实际存放位置
#[value_object]
#[derive(Copy, Hash)]
pub enum UploadLocation {
    #[default]
    LocalHost,
    FtpServer,
}

/// 附件（上传文件的记录）
#[entity(id = AttachmentId, table = "attachments")]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    pub site_id: SiteId,
    pub attachment_type: AttachmentType,
    pub file_name: String,
    pub public_file_name: String,
    pub path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: u64,
    pub mime_type: String,
    pub upload_location: UploadLocation,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

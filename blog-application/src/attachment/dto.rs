use crate::dto::Dto;
use crate::mapper::MapFrom;
use blog_domain::model::{Attachment, AttachmentId, AttachmentType, UploadLocation};
use serde::{Deserialize, Serialize};

/// 文件上传完成后由存储层返回的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResult {
    pub attachment_type: AttachmentType,
    pub file_name: String,
    pub public_file_name: String,
    pub path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: u64,
    pub mime_type: String,
    pub upload_location: UploadLocation,
}

/// 附件输出
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDto {
    pub id: AttachmentId,
    pub attachment_type: AttachmentType,
    pub file_name: String,
    pub public_file_name: String,
    pub path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: u64,
    pub mime_type: String,
    pub upload_location: UploadLocation,
    pub is_main: bool,
}

impl Dto for AttachmentDto {}

impl MapFrom<AttachmentDto> for Attachment {
    fn map_from(source: &AttachmentDto) -> Self {
        Attachment {
            id: source.id,
            attachment_type: source.attachment_type,
            file_name: source.file_name.clone(),
            public_file_name: source.public_file_name.clone(),
            path: source.path.clone(),
            thumbnail_path: source.thumbnail_path.clone(),
            file_size: source.file_size,
            mime_type: source.mime_type.clone(),
            upload_location: source.upload_location,
            is_main: source.is_main,
            ..Default::default()
        }
    }
}

impl MapFrom<FileUploadResult> for Attachment {
    fn map_from(source: &FileUploadResult) -> Self {
        Attachment {
            attachment_type: source.attachment_type,
            file_name: source.file_name.clone(),
            public_file_name: source.public_file_name.clone(),
            path: source.path.clone(),
            thumbnail_path: source.thumbnail_path.clone(),
            file_size: source.file_size,
            mime_type: source.mime_type.clone(),
            upload_location: source.upload_location,
            ..Default::default()
        }
    }
}

impl MapFrom<FileUploadResult> for AttachmentDto {
    fn map_from(source: &FileUploadResult) -> Self {
        AttachmentDto {
            attachment_type: source.attachment_type,
            file_name: source.file_name.clone(),
            public_file_name: source.public_file_name.clone(),
            path: source.path.clone(),
            thumbnail_path: source.thumbnail_path.clone(),
            file_size: source.file_size,
            mime_type: source.mime_type.clone(),
            upload_location: source.upload_location,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map;

    fn upload() -> FileUploadResult {
        FileUploadResult {
            attachment_type: AttachmentType::Photo,
            file_name: "a1b2c3.png".into(),
            public_file_name: "cat.png".into(),
            path: "/uploads/2024/a1b2c3.png".into(),
            thumbnail_path: Some("/uploads/2024/thumb_a1b2c3.png".into()),
            file_size: 2048,
            mime_type: "image/png".into(),
            upload_location: UploadLocation::LocalHost,
        }
    }

    #[test]
    fn test_upload_to_entity_leaves_identity_unset() {
        let source = upload();
        let attachment: Attachment = map(&source);

        assert_eq!(attachment.file_name, source.file_name);
        assert_eq!(attachment.thumbnail_path, source.thumbnail_path);
        assert_eq!(attachment.file_size, 2048);
        assert_eq!(attachment.attachment_type, AttachmentType::Photo);
        assert!(attachment.id.is_nil());
        assert!(attachment.site_id.is_nil());
        assert!(!attachment.is_main);
    }

    #[test]
    fn test_dto_to_entity_keeps_id_and_main_flag() {
        let mut dto: AttachmentDto = map(&upload());
        dto.id = AttachmentId::generate();
        dto.is_main = true;

        let attachment = Attachment::map_from(&dto);
        assert_eq!(attachment.id, dto.id);
        assert!(attachment.is_main);
        assert_eq!(attachment.mime_type, "image/png");
    }

    #[test]
    fn test_dto_serializes_with_field_names() {
        let dto: AttachmentDto = map(&upload());
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["public_file_name"], "cat.png");
        assert_eq!(json["file_size"], 2048);
        assert_eq!(json["is_main"], false);
    }
}

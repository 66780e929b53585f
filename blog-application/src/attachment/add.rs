use super::dto::FileUploadResult;
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::lookup;
use crate::mapper::MapFrom;
use crate::pipeline::{CreateOperation, CreatePipeline};
use crate::validation::{Validate, ValidationErrors};
use async_trait::async_trait;
use blog_domain::model::{Attachment, AttachmentId, Site};
use blog_domain::persist::DataStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 登记一次已完成的文件上传
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddAttachment {
    pub upload: FileUploadResult,
    #[serde(default)]
    pub is_main: bool,
}

impl Command for AddAttachment {
    const NAME: &'static str = "attachment.add";
}

impl Validate for AddAttachment {
    fn validate(&self) -> ValidationErrors {
        let upload = &self.upload;
        let mut errors = ValidationErrors::new();
        errors
            .not_empty("file_name", &upload.file_name)
            .not_empty("public_file_name", &upload.public_file_name)
            .not_empty("path", &upload.path)
            .not_empty("mime_type", &upload.mime_type)
            .positive("file_size", upload.file_size);
        errors
    }
}

impl MapFrom<AddAttachment> for Attachment {
    fn map_from(source: &AddAttachment) -> Self {
        Attachment {
            is_main: source.is_main,
            ..Attachment::map_from(&source.upload)
        }
    }
}

pub struct AddAttachmentHandler<S> {
    pipeline: CreatePipeline<S>,
    store: Arc<S>,
}

impl<S> AddAttachmentHandler<S>
where
    S: DataStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            pipeline: CreatePipeline::new(Arc::clone(&store)),
            store,
        }
    }
}

#[async_trait]
impl<S> CreateOperation for AddAttachmentHandler<S>
where
    S: DataStore,
{
    type Command = AddAttachment;
    type Entity = Attachment;
    type Resolved = Site;

    async fn resolve(&self, _ctx: &AppContext, _cmd: &AddAttachment) -> Result<Site, AppError> {
        lookup::blog_site(self.store.as_ref()).await
    }

    fn derive(
        &self,
        _ctx: &AppContext,
        _cmd: &AddAttachment,
        site: Site,
        attachment: &mut Attachment,
    ) {
        attachment.id = AttachmentId::generate();
        attachment.site_id = site.id;
        attachment.created_at = Utc::now();
    }
}

#[async_trait]
impl<S> CommandHandler<AddAttachment> for AddAttachmentHandler<S>
where
    S: DataStore,
{
    async fn handle(&self, ctx: &AppContext, cmd: AddAttachment) -> Result<(), AppError> {
        self.pipeline.execute(self, ctx, cmd).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    #[test]
    fn test_empty_upload_reports_every_field() {
        let errors = AddAttachment::default().validate();
        for field in ["file_name", "public_file_name", "path", "mime_type"] {
            assert_eq!(errors.rules_for(field), vec![Rule::NotEmpty], "{field}");
        }
        assert_eq!(errors.rules_for("file_size"), vec![Rule::Positive]);
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_mapping_carries_main_flag() {
        let cmd = AddAttachment {
            upload: FileUploadResult {
                file_name: "x.pdf".into(),
                file_size: 10,
                ..Default::default()
            },
            is_main: true,
        };
        let attachment = Attachment::map_from(&cmd);
        assert!(attachment.is_main);
        assert_eq!(attachment.file_name, "x.pdf");
        assert_eq!(attachment.file_size, 10);
    }
}

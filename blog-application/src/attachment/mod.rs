//! 附件 DTO、映射声明与写操作
mod add;
mod dto;

pub use add::{AddAttachment, AddAttachmentHandler};
pub use dto::{AttachmentDto, FileUploadResult};

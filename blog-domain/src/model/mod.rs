//! 持久化实体（Entity）与其值对象
//!
//! 子集合（文章附件、分类关联、元数据）均为实体自有的值集合，
//! 通过外键风格的 id 引用其他行，不持有对象引用。

mod attachment;
mod comment;
mod option;
mod post;
mod site;

pub use attachment::{Attachment, AttachmentId, AttachmentType, UploadLocation};
pub use comment::{Comment, CommentId, Commentmeta};
pub use option::{BlogOption, OptionId, OptionKey, OptionValue};
pub use post::{Post, PostAttachment, PostId, PostStatus, PostType, Postmeta, TaxonomyId, TaxonomyPost};
pub use site::{Site, SiteId, SiteType};

use crate::validation::{ValidationErrors, Violation};
use blog_domain::error::DomainError;
use serde::Serialize;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(DomainError),

    #[error("validation: {0}")]
    Validation(ValidationErrors),

    /// 唯一性前置条件不满足（如重复标题）
    #[error("conflict: {field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("not found: {entity}: {reason}")]
    NotFound {
        entity: &'static str,
        reason: String,
    },

    /// 单条查询命中多条记录
    #[error("integrity: {reason}")]
    Integrity { reason: String },

    /// 提交报告零影响行
    #[error("problem saving changes")]
    Persistence,

    #[error("cancelled before commit")]
    Cancelled,

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MultipleMatches { table, matched } => AppError::Integrity {
                reason: format!("{matched} rows matched a single-row lookup on {table}"),
            },
            other => AppError::Domain(other),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// 抽象错误类别，由（不在本 crate 内的）传输层翻译为具体协议响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

/// 可供调用方修正输入的结构化细节
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Violations(Vec<Violation>),
    Field { field: &'static str, message: String },
    Message(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::Conflict { .. } => ErrorKind::BadRequest,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Domain(_)
            | AppError::Integrity { .. }
            | AppError::Persistence
            | AppError::Cancelled
            | AppError::HandlerNotFound(_) => ErrorKind::Internal,
        }
    }

    /// 调用方能否通过修正输入后重试
    pub fn is_caller_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// 结构化细节；服务端错误不暴露任何细节
    pub fn detail(&self) -> Option<ErrorDetail> {
        match self {
            AppError::Validation(errors) => {
                Some(ErrorDetail::Violations(errors.iter().cloned().collect()))
            }
            AppError::Conflict { field, message } => Some(ErrorDetail::Field {
                field: *field,
                message: message.clone(),
            }),
            AppError::NotFound { entity, reason } => {
                Some(ErrorDetail::Message(format!("{entity}: {reason}")))
            }
            _ => None,
        }
    }

    pub(crate) fn not_found(entity: &'static str, reason: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            reason: reason.into(),
        }
    }
}

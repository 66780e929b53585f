//! 领域层统一错误定义
//!
//! 聚焦查询、工作单元提交与值校验三类错误，
//! 由应用层统一转换为 `AppError`。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    /// 单条查询命中多条记录：属于数据或不变量缺陷，不可由调用方修复
    #[error("multiple matches: table={table}, matched={matched}")]
    MultipleMatches { table: &'static str, matched: usize },

    /// 提交批次中的主键已存在（或批次内重复）
    #[error("duplicate key: table={table}, id={id}")]
    DuplicateKey { table: &'static str, id: String },

    #[error("repository error: {reason}")]
    Repository { reason: String },

    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_table() {
        let err = DomainError::DuplicateKey {
            table: "posts",
            id: "p-1".into(),
        };
        assert_eq!(err.to_string(), "duplicate key: table=posts, id=p-1");

        let err = DomainError::MultipleMatches {
            table: "sites",
            matched: 2,
        };
        assert_eq!(err.to_string(), "multiple matches: table=sites, matched=2");
    }
}

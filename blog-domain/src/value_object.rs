//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use std::fmt;

use blog_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::slug::FALLBACK_SLUG;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// URL 安全的文章别名（slug）
///
/// 仅由小写字母/数字（含 Unicode 字母）与单个 `-` 分隔符组成，首尾不为 `-`。
/// 默认值为兜底别名 `untitled`。
///
/// ```
/// use blog_domain::value_object::Slug;
///
/// let slug = Slug::parse("hello-world").unwrap();
/// assert_eq!(slug.as_str(), "hello-world");
/// assert!(Slug::parse("Hello World").is_err());
/// ```
#[value_object(default = false)]
#[derive(Hash)]
pub struct Slug(String);

impl Default for Slug {
    fn default() -> Self {
        Self(FALLBACK_SLUG.to_string())
    }
}

impl Slug {
    /// 解析并校验已是 slug 形状的文本
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let slug = Self(value.into());
        slug.validate()?;
        Ok(slug)
    }

    /// 由生成器构造，调用方保证形状合法
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(Self(value.clone()).validate().is_ok(), "{value}");
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for Slug {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let s = self.0.as_str();
        if s.is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "slug must not be empty".to_string(),
            });
        }
        if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(DomainError::InvalidValue {
                reason: format!("slug has misplaced separators: {s}"),
            });
        }
        if let Some(c) = s
            .chars()
            .find(|c| *c != '-' && !(c.is_alphanumeric() && !c.is_uppercase()))
        {
            return Err(DomainError::InvalidValue {
                reason: format!("slug contains invalid character {c:?}: {s}"),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_accepts_lowercase_words() {
        assert!(Slug::parse("rust-2024-edition").is_ok());
        assert!(Slug::parse("سلام-دنیا").is_ok());
    }

    #[test]
    fn test_slug_rejects_malformed_values() {
        for bad in ["", "-lead", "trail-", "double--dash", "Upper", "with space", "a/b"] {
            assert!(Slug::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_default_slug_is_valid() {
        let slug = Slug::default();
        assert_eq!(slug.as_str(), FALLBACK_SLUG);
        assert!(slug.validate().is_ok());
    }

    #[test]
    fn test_slug_serde_is_transparent_string() {
        let slug = Slug::parse("hello").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"hello\"");
    }
}

//! 命令校验
//!
//! 每个命令以普通函数形式给出规则集（见各命令的 [`Validate`] 实现），
//! 返回违规列表；列表为空即可继续执行。校验无副作用。
//!
use serde::Serialize;
use std::fmt;

/// 被违反的规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// 文本不能为空或仅含空白
    NotEmpty,
    /// 必填项缺失
    Required,
    /// 字符数上限
    MaxLength { max: usize },
    /// 数值必须大于零
    Positive,
    /// 引用了不存在或不匹配的记录
    InvalidReference,
}

/// 单条字段级违规
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    #[serde(flatten)]
    pub rule: Rule,
    pub message: String,
}

/// 校验结果：违规集合，为空表示通过
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 仅含一条违规
    pub fn single(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, rule, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, rule: Rule, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            rule,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// 是否包含针对某字段的违规
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// 某字段上被违反的规则
    pub fn rules_for(&self, field: &str) -> Vec<Rule> {
        self.0
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.rule)
            .collect()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    // -------- 规则 --------

    /// 文本非空（空白视为空）
    pub fn not_empty(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, Rule::NotEmpty, format!("'{field}' must not be empty"));
        }
        self
    }

    /// 文本字符数不超过 `max`
    pub fn max_length(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len > max {
            self.push(
                field,
                Rule::MaxLength { max },
                format!("'{field}' must be {max} characters or fewer, got {len}"),
            );
        }
        self
    }

    /// 可选值必须存在
    pub fn required<T>(&mut self, field: &'static str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.push(field, Rule::Required, format!("'{field}' is required"));
        }
        self
    }

    /// 标识不能为空值（如全零 UUID）
    pub fn not_nil(&mut self, field: &'static str, is_nil: bool) -> &mut Self {
        if is_nil {
            self.push(field, Rule::NotEmpty, format!("'{field}' must not be empty"));
        }
        self
    }

    /// 数值大于零
    pub fn positive(&mut self, field: &'static str, value: u64) -> &mut Self {
        if value == 0 {
            self.push(field, Rule::Positive, format!("'{field}' must be greater than 0"));
        }
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// 命令校验：纯函数，返回全部违规
pub trait Validate {
    fn validate(&self) -> ValidationErrors;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_collect_every_violation() {
        let mut errors = ValidationErrors::new();
        errors
            .not_empty("title", "   ")
            .max_length("title", &"a".repeat(151), 150)
            .required::<u8>("post_status", &None)
            .positive("file_size", 0);

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.rules_for("title"),
            vec![Rule::NotEmpty, Rule::MaxLength { max: 150 }]
        );
        assert!(errors.has_field("post_status"));
        assert!(errors.has_field("file_size"));
    }

    #[test]
    fn test_passing_values_produce_nothing() {
        let mut errors = ValidationErrors::new();
        errors
            .not_empty("content", "x")
            .max_length("title", &"a".repeat(150), 150)
            .required("post_status", &Some(1))
            .not_nil("post_id", false)
            .positive("file_size", 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_max_length_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        errors.max_length("title", &"س".repeat(150), 150);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let errors = ValidationErrors::single("title", Rule::MaxLength { max: 150 }, "too long");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "field": "title", "rule": "max_length", "max": 150, "message": "too long" }
            ])
        );
    }
}

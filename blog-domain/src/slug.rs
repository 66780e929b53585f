//! 别名生成（Slug Generation）
//!
//! 将任意标题文本规范化为 URL 安全的 [`Slug`]。同一输入永远得到同一输出。
//!
use crate::value_object::Slug;

/// 别名生成器
pub trait SlugGenerator: Send + Sync {
    fn generate_slug(&self, text: &str) -> Slug;
}

/// 无可用字符时的兜底别名
pub const FALLBACK_SLUG: &str = "untitled";

/// 默认别名生成器
///
/// - 小写化，保留 Unicode 字母与数字；
/// - 其余字符的连续片段替换为单个 `-`，并去掉首尾 `-`；
/// - 超过 `max_chars` 时截断，尽量落在 `-` 边界上；
/// - 结果为空时返回 [`FALLBACK_SLUG`]。
#[derive(Debug, Clone)]
pub struct DefaultSlugGenerator {
    max_chars: usize,
}

impl Default for DefaultSlugGenerator {
    fn default() -> Self {
        Self { max_chars: 200 }
    }
}

impl DefaultSlugGenerator {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    fn normalize(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pending_dash = false;

        for c in text.chars() {
            if c.is_alphanumeric() {
                for lc in c.to_lowercase() {
                    // 部分字符小写化后会产生组合符号，直接丢弃
                    if lc.is_alphanumeric() && !lc.is_uppercase() {
                        if pending_dash && !out.is_empty() {
                            out.push('-');
                        }
                        pending_dash = false;
                        out.push(lc);
                    }
                }
            } else {
                pending_dash = true;
            }
        }

        out
    }

    fn truncate(&self, slug: String) -> String {
        if slug.chars().count() <= self.max_chars {
            return slug;
        }

        let cut: String = slug.chars().take(self.max_chars).collect();
        let next_is_dash = slug.chars().nth(self.max_chars) == Some('-');

        let cut = match cut.rfind('-') {
            Some(idx) if !next_is_dash => cut[..idx].to_string(),
            _ => cut,
        };

        cut.trim_end_matches('-').to_string()
    }
}

impl SlugGenerator for DefaultSlugGenerator {
    fn generate_slug(&self, text: &str) -> Slug {
        let slug = self.truncate(Self::normalize(text));
        if slug.is_empty() {
            return Slug::from_generated(FALLBACK_SLUG.to_string());
        }
        Slug::from_generated(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(text: &str) -> String {
        DefaultSlugGenerator::default()
            .generate_slug(text)
            .into_inner()
    }

    #[test]
    fn test_basic_title() {
        assert_eq!(slug("Hello, World!"), "hello-world");
        assert_eq!(slug("  Rust   2024 -- Edition  "), "rust-2024-edition");
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(slug("سلام دنیا"), "سلام-دنیا");
        assert_eq!(slug("Straße Ärger"), "straße-ärger");
    }

    #[test]
    fn test_empty_or_symbol_only_falls_back() {
        assert_eq!(slug(""), FALLBACK_SLUG);
        assert_eq!(slug("!!! ???"), FALLBACK_SLUG);
    }

    #[test]
    fn test_deterministic() {
        let g = DefaultSlugGenerator::default();
        let text = "The Same Title, Twice";
        assert_eq!(g.generate_slug(text), g.generate_slug(text));
    }

    #[test]
    fn test_already_slug_shaped_input_is_stable() {
        assert_eq!(slug("my-custom-slug"), "my-custom-slug");
        assert_eq!(slug("My Custom Slug"), "my-custom-slug");
    }

    #[test]
    fn test_truncates_on_separator_boundary() {
        let g = DefaultSlugGenerator::new(12);
        // "alpha-beta-gamma" 截到 12 个字符为 "alpha-beta-g"，回退到最后一个 `-`
        assert_eq!(g.generate_slug("alpha beta gamma").as_str(), "alpha-beta");
        // 单个超长单词无法回退，直接硬截断
        assert_eq!(g.generate_slug("abcdefghijklmnop").as_str(), "abcdefghijkl");
        // 恰好在分隔符处截断
        let g = DefaultSlugGenerator::new(13);
        assert_eq!(g.generate_slug("alpha beta ab gamma").as_str(), "alpha-beta-ab");
    }
}

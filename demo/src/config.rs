use blog_domain::model::OptionValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub log_filter: LogFilter,
    pub seed: SeedConfig,
}

/// `tracing_subscriber::EnvFilter` 指令串，`RUST_LOG` 优先
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogFilter(pub String);

impl Default for LogFilter {
    fn default() -> Self {
        Self("info,blog_application=debug".to_string())
    }
}

/// 启动时写入内存存储的初始数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub site_name: String,
    pub site_domain: String,
    pub comment_moderation: CommentModeration,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            site_name: "My Blog".to_string(),
            site_domain: "blog.localhost".to_string(),
            comment_moderation: CommentModeration::Approved,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentModeration {
    #[default]
    Approved,
    Pending,
}

impl From<CommentModeration> for OptionValue {
    fn from(value: CommentModeration) -> Self {
        match value {
            CommentModeration::Approved => OptionValue::CommentApproved,
            CommentModeration::Pending => OptionValue::CommentNotApproved,
        }
    }
}

impl DemoConfig {
    /// 默认值 → `blog.toml`（可选）→ `BLOG_` 前缀环境变量，如 `BLOG_SEED__SITE_NAME`
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&DemoConfig::default())?)
            .add_source(config::File::with_name("blog").required(false))
            .add_source(
                config::Environment::with_prefix("BLOG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

use crate::model::{BlockId, Scope};
use thiserror::Error;

/// Tag prefixed to user-visible frontmatter errors.
pub const PRODUCT_TAG: &str = "mindmap-nextgen";

#[derive(Error, Debug)]
pub enum SettingsError {
    /// Malformed header text, or a header whose root is not a mapping.
    #[error("[{tag}] Invalid {format} frontmatter in {scope}: {detail}", tag = PRODUCT_TAG)]
    InvalidFrontmatter {
        format: &'static str,
        scope: Scope,
        detail: String,
    },

    /// The host could not resolve the line boundaries of a code block.
    #[error("Missing section info for code block {0}")]
    MissingSectionInfo(BlockId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

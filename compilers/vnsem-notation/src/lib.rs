pub mod labels;
pub mod semantics;
pub mod source;
pub mod syntax;

use thiserror::Error;

pub use labels::parse_arg_label;
pub use semantics::parse_template;
pub use source::{compile_class, compile_source, ClassSource, ResourceSource};
pub use syntax::parse_frame_syntax;

#[derive(Debug, Error)]
pub enum NotationError {
    #[error("invalid argument label `{0}`")]
    Label(String),
    #[error("invalid frame syntax `{input}`: {reason}")]
    Syntax { input: String, reason: String },
    #[error("invalid predicate template `{0}`")]
    Template(String),
    #[error("unknown semantic predicate `{0}`")]
    UnknownPredicate(String),
    #[error("class `{class}`, frame {frame}: {source}")]
    Frame {
        class: String,
        frame: usize,
        source: Box<NotationError>,
    },
    #[error("malformed class source: {0}")]
    Json(#[from] serde_json::Error),
}

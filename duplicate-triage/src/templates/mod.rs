//! Comment rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{
    create_handlebars_registry, CommentContext, TemplateRenderer, DEFAULT_COMMENT_TEMPLATE,
};

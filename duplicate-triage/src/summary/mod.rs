//! Run summary types.

mod comment_status;
mod triage_summary;

pub use comment_status::CommentStatus;
pub use triage_summary::{DuplicateMatch, TriageSummary};

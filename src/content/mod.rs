//! View models built from raw repository documents

mod post;

pub use post::{ContentSection, PostDetail, PostSummary};

mod post;
mod tag;

pub use post::{Post, PostStatus};
pub use tag::Tag;

//! Avatar file storage implementations.

mod local;

pub use local::LocalAvatarStorage;

//! Data models for mdblog.
//!
//! - [`Post`]: A published post with its store-assigned id
//! - [`RawPost`]: A stored record before timestamp decoding
//! - [`NewPost`]: Post data written on publish
//! - [`Draft`]: The title/content pair being edited

mod post;

pub use post::{Draft, NewPost, Post, RawPost};

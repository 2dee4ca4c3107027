//! Post storage: the repository and its backends.
//!
//! [`PostRepository`] is what the controller talks to. It sits on top of a
//! boxed [`PostStore`], the three capabilities the blog needs from a document
//! store: an ordered query, insert with a generated id, and delete by id.
//!
//! ## Backends
//!
//! - [`FirestoreStore`]: Cloud Firestore over its REST API
//! - [`FileStore`]: Markdown files with TOML frontmatter in a local directory
//! - [`MemoryStore`]: In-process records, used by tests
//!
//! ## File Format
//!
//! ```markdown
//! +++
//! id = "k3j9x0a1qz7m"
//! title = "Hello"
//! created_at = "2024-01-15T10:30:00Z"
//! +++
//!
//! # Hi
//!
//! World
//! ```

mod file;
mod firestore;
mod markdown;
mod memory;
mod repository;

pub use file::FileStore;
pub use firestore::FirestoreStore;
pub use markdown::{parse_post, render_post};
pub use memory::{MemoryStore, StoreCalls};
pub use repository::PostRepository;

use crate::config::{BlogConfig, StoreBackend};
use crate::error::Result;
use crate::model::{NewPost, RawPost};
use std::path::Path;

/// The narrow interface between the repository and a concrete document store.
pub trait PostStore {
    /// All records, newest `created_at` first as the store orders them.
    fn query_newest_first(&self) -> Result<Vec<RawPost>>;

    /// Insert a record and return the id the store generated for it.
    fn insert(&self, post: &NewPost) -> Result<String>;

    /// Remove the record with this id.
    fn delete(&self, id: &str) -> Result<()>;
}

impl<S: PostStore + ?Sized> PostStore for Box<S> {
    fn query_newest_first(&self) -> Result<Vec<RawPost>> {
        (**self).query_newest_first()
    }

    fn insert(&self, post: &NewPost) -> Result<String> {
        (**self).insert(post)
    }

    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}

/// Build the backend selected in the config.
pub fn open(config: &BlogConfig, project_root: &Path) -> Result<Box<dyn PostStore>> {
    match config.blog.backend {
        StoreBackend::Local => Ok(Box::new(FileStore::new(config.posts_path(project_root)))),
        StoreBackend::Firestore => Ok(Box::new(FirestoreStore::new(&config.firestore)?)),
    }
}

/// Newest to oldest, with records lacking a usable timestamp first.
///
/// Firestore would drop a record with no `createdAt` from the query. The
/// local stores keep it and put it where its read-time "now" belongs.
pub(crate) fn sort_newest_first(records: &mut [RawPost]) {
    records.sort_by(|a, b| match (a.created_at, b.created_at) {
        (None, None) => a.id.cmp(&b.id),
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.id.cmp(&b.id)),
    });
}

/// Random lowercase alphanumeric id for the local backends.
pub(crate) fn generate_id() -> String {
    const ALPHABET: [char; 36] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
        'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    ];
    nanoid::format(nanoid::rngs::default, &ALPHABET, 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn raw(id: &str, secs: Option<i64>) -> RawPost {
        RawPost {
            id: id.to_string(),
            created_at: secs.map(|s| Utc.timestamp_opt(s, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![raw("a", Some(10)), raw("b", Some(30)), raw("c", Some(20))];
        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_puts_missing_timestamps_first() {
        let mut records = vec![raw("a", Some(10)), raw("b", None), raw("c", Some(20))];
        sort_newest_first(&mut records);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "c");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 12);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }
}

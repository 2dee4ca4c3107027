use super::PostStore;
use crate::error::Result;
use crate::model::{NewPost, Post};
use crate::validation;
use chrono::Utc;

/// Translation layer between the controller and a document store.
///
/// Holds no state besides the store handle: every call is a round trip.
pub struct PostRepository {
    store: Box<dyn PostStore>,
}

impl PostRepository {
    pub fn new(store: impl PostStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn from_boxed(store: Box<dyn PostStore>) -> Self {
        Self { store }
    }

    /// All posts, newest first, as a one-off snapshot.
    pub fn list(&self) -> Result<Vec<Post>> {
        let records = self.store.query_newest_first()?;
        let now = Utc::now();
        let posts: Vec<Post> = records
            .into_iter()
            .map(|raw| Post::from_raw(raw, now))
            .collect();
        tracing::debug!(count = posts.len(), "Loaded posts");
        Ok(posts)
    }

    /// Publish a post stamped with the current time and return its id.
    pub fn create(&self, title: &str, content: &str) -> Result<String> {
        validation::validate_draft(title, content)?;

        tracing::info!(title = %title, "Creating post");
        let id = self.store.insert(&NewPost::new(title, content))?;
        tracing::info!(id = %id, "Created post");
        Ok(id)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        tracing::info!(id = %id, "Deleting post");
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BlogError, MissingField};
    use crate::model::RawPost;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn repo() -> (PostRepository, MemoryStore) {
        let store = MemoryStore::new();
        (PostRepository::new(store.clone()), store)
    }

    #[test]
    fn test_create_rejects_empty_title_without_store_call() {
        let (repo, store) = repo();
        let err = repo.create("", "content").unwrap_err();
        assert!(matches!(err, BlogError::Validation(MissingField::Title)));
        assert_eq!(store.calls().inserts, 0);
    }

    #[test]
    fn test_create_rejects_empty_content_without_store_call() {
        let (repo, store) = repo();
        let err = repo.create("Title", "").unwrap_err();
        assert!(matches!(err, BlogError::Validation(MissingField::Content)));
        assert_eq!(store.calls().inserts, 0);
    }

    #[test]
    fn test_create_stamps_current_time() {
        let (repo, _store) = repo();
        let before = Utc::now();
        let id = repo.create("Hello", "World").unwrap();

        let posts = repo.list().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert!(posts[0].created_at >= before);
        assert!(posts[0].created_at <= Utc::now());
    }

    #[test]
    fn test_list_is_newest_first() {
        let (repo, store) = repo();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for (id, offset) in [("a", 3), ("b", 1), ("c", 2)] {
            store.insert_raw(RawPost {
                id: id.to_string(),
                title: id.to_string(),
                content: "x".to_string(),
                created_at: Some(t1 + Duration::days(offset)),
            });
        }

        let posts = repo.list().unwrap();
        assert!(
            posts
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
        assert_eq!(posts[0].id, "a");
    }

    #[test]
    fn test_list_coerces_missing_timestamp_at_read_time() {
        let (repo, store) = repo();
        store.insert_raw(RawPost {
            id: "undated".to_string(),
            title: "Undated".to_string(),
            content: "x".to_string(),
            created_at: None,
        });

        let before = Utc::now();
        let first = repo.list().unwrap();
        assert!(first[0].created_at >= before);

        let second = repo.list().unwrap();
        assert!(second[0].created_at >= first[0].created_at);
    }

    #[test]
    fn test_list_propagates_store_failure() {
        let (repo, store) = repo();
        store.set_unavailable(true);
        assert!(matches!(repo.list(), Err(BlogError::StoreUnavailable(_))));
    }

    #[test]
    fn test_delete_removes_only_that_post() {
        let (repo, _store) = repo();
        let keep = repo.create("Keep", "a").unwrap();
        let gone = repo.create("Gone", "b").unwrap();

        repo.delete(&gone).unwrap();

        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![keep]);
    }
}

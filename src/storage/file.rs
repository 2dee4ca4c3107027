use super::markdown::{parse_post, render_post};
use super::{PostStore, generate_id, sort_newest_first};
use crate::error::{BlogError, Result};
use crate::model::{NewPost, RawPost};
use crate::validation;
use slug::slugify;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Posts kept as one Markdown file each under a local directory.
pub struct FileStore {
    posts_path: PathBuf,
}

impl FileStore {
    pub fn new(posts_path: impl Into<PathBuf>) -> Self {
        Self {
            posts_path: posts_path.into(),
        }
    }

    pub fn posts_path(&self) -> &Path {
        &self.posts_path
    }

    pub fn generate_filename(&self, id: &str, title: &str) -> String {
        let slug = slugify(title);
        let slug: String = slug.chars().take(50).collect();
        if slug.is_empty() {
            format!("{}.md", id)
        } else {
            format!("{}--{}.md", id, slug)
        }
    }

    pub fn find_file_by_id(&self, id: &str) -> Result<Option<PathBuf>> {
        if !validation::is_safe_file_id(id) || !self.posts_path.exists() {
            return Ok(None);
        }

        let exact = format!("{}.md", id);
        let prefix = format!("{}--", id);
        for entry in std::fs::read_dir(&self.posts_path)? {
            let path = entry?.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name == exact || (name.starts_with(&prefix) && name.ends_with(".md")) {
                    return Ok(Some(path));
                }
            }
        }
        Ok(None)
    }

    /// Write to a temp file in the same directory, then rename over the target.
    fn atomic_write(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            BlogError::Config(format!("Post path has no parent: {}", path.display()))
        })?;
        let mut temp_file = NamedTempFile::new_in(parent)?;
        std::io::Write::write_all(&mut temp_file, content.as_bytes())?;
        temp_file.persist(path).map_err(|e| BlogError::Io(e.error))?;
        Ok(())
    }

    fn id_from_filename(path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match stem.split_once("--") {
            Some((id, _)) => id.to_string(),
            None => stem,
        }
    }
}

impl PostStore for FileStore {
    fn query_newest_first(&self) -> Result<Vec<RawPost>> {
        tracing::debug!(path = %self.posts_path.display(), "Listing posts");

        let mut records = Vec::new();
        if !self.posts_path.exists() {
            return Ok(records);
        }

        for entry in std::fs::read_dir(&self.posts_path)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let content = std::fs::read_to_string(&path)?;
            match parse_post(&content) {
                Ok(mut raw) => {
                    if raw.id.is_empty() {
                        raw.id = Self::id_from_filename(&path);
                    }
                    records.push(raw);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable post file"
                    );
                }
            }
        }

        sort_newest_first(&mut records);
        Ok(records)
    }

    fn insert(&self, post: &NewPost) -> Result<String> {
        std::fs::create_dir_all(&self.posts_path)?;

        let id = generate_id();
        let file_path = self
            .posts_path
            .join(self.generate_filename(&id, &post.title));

        if file_path.exists() {
            return Err(BlogError::StoreUnavailable(format!(
                "File already exists: {}",
                file_path.display()
            )));
        }

        let content = render_post(&id, &post.title, &post.content, post.created_at)?;
        self.atomic_write(&file_path, &content)?;

        tracing::debug!(id = %id, path = %file_path.display(), "Wrote post file");
        Ok(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        match self.find_file_by_id(id)? {
            Some(path) => {
                std::fs::remove_file(&path)?;
                tracing::debug!(id = %id, path = %path.display(), "Removed post file");
            }
            None => tracing::debug!(id = %id, "Delete of unknown post id"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("posts"));
        (store, temp_dir)
    }

    #[test]
    fn test_query_on_missing_directory_is_empty() {
        let (store, _temp_dir) = store();
        assert!(store.query_newest_first().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_query() {
        let (store, _temp_dir) = store();
        let id = store.insert(&NewPost::new("Hello", "# Hi\n\nWorld")).unwrap();

        let records = store.query_newest_first().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].title, "Hello");
        assert_eq!(records[0].content, "# Hi\n\nWorld");
        assert!(records[0].created_at.is_some());
    }

    #[test]
    fn test_title_with_delimiter_line_survives() {
        let (store, _temp_dir) = store();
        let id = store
            .insert(&NewPost::new("Release\n+++\nnotes", "body"))
            .unwrap();

        let records = store.query_newest_first().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].title, "Release\n+++\nnotes");
        assert_eq!(records[0].content, "body");
    }

    #[test]
    fn test_filename_uses_slug() {
        let (store, _temp_dir) = store();
        assert_eq!(
            store.generate_filename("abc", "Hello, World!"),
            "abc--hello-world.md"
        );
        assert_eq!(store.generate_filename("abc", "!!!"), "abc.md");
    }

    #[test]
    fn test_query_orders_newest_first() {
        let (store, _temp_dir) = store();
        let now = Utc::now();
        let old = store
            .insert(&NewPost::new("Old", "a").with_created_at(now - Duration::hours(2)))
            .unwrap();
        let new = store
            .insert(&NewPost::new("New", "b").with_created_at(now))
            .unwrap();

        let ids: Vec<_> = store
            .query_newest_first()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![new, old]);
    }

    #[test]
    fn test_delete_removes_only_that_file() {
        let (store, _temp_dir) = store();
        let keep = store.insert(&NewPost::new("Keep", "a")).unwrap();
        let gone = store.insert(&NewPost::new("Gone", "b")).unwrap();

        store.delete(&gone).unwrap();

        let records = store.query_newest_first().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, keep);
    }

    #[test]
    fn test_delete_unknown_id_is_ok() {
        let (store, _temp_dir) = store();
        store.insert(&NewPost::new("Keep", "a")).unwrap();
        assert!(store.delete("nope").is_ok());
        assert!(store.delete("../posts").is_ok());
        assert_eq!(store.query_newest_first().unwrap().len(), 1);
    }

    #[test]
    fn test_hand_written_file_without_timestamp() {
        let (store, _temp_dir) = store();
        std::fs::create_dir_all(store.posts_path()).unwrap();
        std::fs::write(
            store.posts_path().join("manual--note.md"),
            "+++\ntitle = \"Note\"\n+++\n\nbody",
        )
        .unwrap();
        std::fs::write(store.posts_path().join("ignored.txt"), "not a post").unwrap();

        let records = store.query_newest_first().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "manual");
        assert_eq!(records[0].created_at, None);
    }
}

//! The blog view state and the actions that change it.
//!
//! [`BlogController`] owns the draft and the loaded post list. Draft edits
//! and list reloads touch disjoint state; every mutation of the store is
//! followed by one full reload that replaces the list.

use crate::error::Result;
use crate::markup::{self, Element};
use crate::model::{Draft, Post};
use crate::storage::PostRepository;
use crate::transfer;
use crate::validation;
use std::path::{Path, PathBuf};

pub struct BlogController {
    repo: PostRepository,
    draft: Draft,
    posts: Vec<Post>,
    mounted: bool,
    fallback_name: String,
}

impl BlogController {
    pub fn new(repo: PostRepository, fallback_name: impl Into<String>) -> Self {
        Self {
            repo,
            draft: Draft::default(),
            posts: Vec::new(),
            mounted: false,
            fallback_name: fallback_name.into(),
        }
    }

    /// Initial load. Only the first call reaches the store.
    pub fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;
        self.reload()
    }

    /// Replace the list with a fresh snapshot. On failure the previous list
    /// stays as it was.
    pub fn reload(&mut self) -> Result<()> {
        self.posts = self.repo.list()?;
        Ok(())
    }

    /// Create a post from the draft, clear the draft, then reload.
    ///
    /// An empty title or content fails before any store call and leaves the
    /// draft as it was. Returns the new post's id.
    pub fn publish(&mut self) -> Result<String> {
        validation::validate_draft(&self.draft.title, &self.draft.content)?;

        let id = self.repo.create(&self.draft.title, &self.draft.content)?;
        self.draft.clear();
        self.reload()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.repo.delete(id)?;
        self.reload()
    }

    /// Save the draft content to `dir`, named after the draft title.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        transfer::export_to_file(
            &self.draft.content,
            &self.draft.title,
            &self.fallback_name,
            dir,
        )
    }

    /// Replace the draft content with a file's text; the title is kept.
    /// Returns whether anything was imported.
    pub fn import(&mut self, path: Option<&Path>) -> Result<bool> {
        match transfer::import_from_file(path)? {
            Some(text) => {
                self.draft.content = text;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// The last successful `list()` result.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    /// Every loaded post with its content rendered.
    pub fn rendered_posts(&self) -> impl Iterator<Item = (&Post, Vec<Element>)> {
        self.posts
            .iter()
            .map(|post| (post, markup::render(&post.content)))
    }

    pub fn fallback_name(&self) -> &str {
        &self.fallback_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BlogError, MissingField};
    use crate::storage::{MemoryStore, StoreCalls};
    use tempfile::TempDir;

    fn controller() -> (BlogController, MemoryStore) {
        let store = MemoryStore::new();
        let controller = BlogController::new(PostRepository::new(store.clone()), "blogpost");
        (controller, store)
    }

    #[test]
    fn test_mount_loads_once() {
        let (mut c, store) = controller();
        c.mount().unwrap();
        c.mount().unwrap();
        assert_eq!(store.calls().queries, 1);
    }

    #[test]
    fn test_publish_empty_title_leaves_draft_and_store_alone() {
        let (mut c, store) = controller();
        c.set_content("# Body");

        let err = c.publish().unwrap_err();
        assert!(matches!(err, BlogError::Validation(MissingField::Title)));
        assert_eq!(c.draft(), &Draft::new("", "# Body"));
        assert_eq!(store.calls(), StoreCalls::default());
    }

    #[test]
    fn test_publish_empty_content_leaves_draft_and_store_alone() {
        let (mut c, store) = controller();
        c.set_title("Hello");

        let err = c.publish().unwrap_err();
        assert!(matches!(err, BlogError::Validation(MissingField::Content)));
        assert_eq!(c.draft(), &Draft::new("Hello", ""));
        assert_eq!(store.calls().inserts, 0);
    }

    #[test]
    fn test_publish_creates_once_reloads_once_and_clears() {
        let (mut c, store) = controller();
        c.set_title("Hello");
        c.set_content("# Hi\n\nWorld");

        let id = c.publish().unwrap();

        assert_eq!(
            store.calls(),
            StoreCalls {
                queries: 1,
                inserts: 1,
                deletes: 0
            }
        );
        assert!(c.draft().is_empty());
        assert_eq!(c.posts().len(), 1);
        assert_eq!(c.posts()[0].id, id);
    }

    #[test]
    fn test_publish_failure_keeps_draft() {
        let (mut c, store) = controller();
        c.set_title("Hello");
        c.set_content("World");
        store.set_unavailable(true);

        assert!(matches!(c.publish(), Err(BlogError::StoreUnavailable(_))));
        assert_eq!(c.draft(), &Draft::new("Hello", "World"));
        assert_eq!(store.calls().queries, 0);
    }

    #[test]
    fn test_delete_reloads() {
        let (mut c, store) = controller();
        c.set_title("Keep");
        c.set_content("a");
        let keep = c.publish().unwrap();
        c.set_title("Gone");
        c.set_content("b");
        let gone = c.publish().unwrap();
        assert_eq!(c.posts().len(), 2);

        c.delete(&gone).unwrap();

        assert_eq!(store.calls().deletes, 1);
        assert_eq!(store.calls().queries, 3);
        let ids: Vec<_> = c.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![keep.as_str()]);
    }

    #[test]
    fn test_reload_failure_keeps_previous_list() {
        let (mut c, store) = controller();
        c.set_title("Hello");
        c.set_content("World");
        c.publish().unwrap();

        store.set_unavailable(true);
        assert!(c.reload().is_err());
        assert_eq!(c.posts().len(), 1);
    }

    #[test]
    fn test_export_uses_title_and_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let (mut c, _store) = controller();
        c.set_content("# Hi");

        let path = c.export(temp_dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "blogpost.md");

        c.set_title("Hello");
        let path = c.export(temp_dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Hello.md");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hi");
    }

    #[test]
    fn test_import_replaces_content_keeps_title() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("in.md");
        std::fs::write(&path, "# Imported").unwrap();

        let (mut c, _store) = controller();
        c.set_title("Mine");
        c.set_content("old");

        assert!(c.import(Some(&path)).unwrap());
        assert_eq!(c.draft(), &Draft::new("Mine", "# Imported"));

        assert!(!c.import(None).unwrap());
        assert_eq!(c.draft().content, "# Imported");
    }

    #[test]
    fn test_rendered_posts() {
        let (mut c, _store) = controller();
        c.set_title("Hello");
        c.set_content("# Hi\n\nWorld");
        c.publish().unwrap();

        let rendered: Vec<_> = c.rendered_posts().collect();
        assert_eq!(rendered.len(), 1);
        let (post, elements) = &rendered[0];
        assert_eq!(post.title, "Hello");
        assert!(matches!(&elements[0], Element::Heading { level: 1, .. }));
        assert_eq!(elements[0].plain(), "Hi");
        assert!(matches!(&elements[1], Element::Paragraph { .. }));
        assert_eq!(elements[1].plain(), "World");
    }
}

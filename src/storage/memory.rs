use super::{PostStore, generate_id, sort_newest_first};
use crate::error::{BlogError, Result};
use crate::model::{NewPost, RawPost};
use std::cell::RefCell;
use std::rc::Rc;

/// Number of calls a [`MemoryStore`] has served, per capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub queries: usize,
    pub inserts: usize,
    pub deletes: usize,
}

#[derive(Default)]
struct MemoryState {
    records: Vec<RawPost>,
    calls: StoreCalls,
    unavailable: bool,
}

/// In-process store.
///
/// Clones share the same records, so a test can keep a handle after boxing
/// one into a repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as is, bypassing id generation and timestamping.
    pub fn insert_raw(&self, raw: RawPost) {
        self.state.borrow_mut().records.push(raw);
    }

    pub fn calls(&self) -> StoreCalls {
        self.state.borrow().calls
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every following call fail as if the network were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.borrow_mut().unavailable = unavailable;
    }

    fn check_available(state: &MemoryState) -> Result<()> {
        if state.unavailable {
            return Err(BlogError::StoreUnavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl PostStore for MemoryStore {
    fn query_newest_first(&self) -> Result<Vec<RawPost>> {
        let mut state = self.state.borrow_mut();
        state.calls.queries += 1;
        Self::check_available(&state)?;

        let mut records = state.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn insert(&self, post: &NewPost) -> Result<String> {
        let mut state = self.state.borrow_mut();
        state.calls.inserts += 1;
        Self::check_available(&state)?;

        let id = generate_id();
        state.records.push(RawPost {
            id: id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: Some(post.created_at),
        });
        Ok(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.deletes += 1;
        Self::check_available(&state)?;

        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        if state.records.len() == before {
            tracing::debug!(id = %id, "Delete of unknown post id");
        }
        Ok(())
    }
}

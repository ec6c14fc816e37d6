use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{ChapterIndex, FetchState};
use crate::navigator::Navigator;
use crate::retriever::{ChapterSource, Completion, RequestTag, Retriever};

/// What happened to a completion taken off the retriever channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// It answered the latest request and is now the fetch state.
    Current,
    /// It answered a request that was superseded and was dropped.
    Stale,
}

/// The reading session: current chapter plus what to show for it.
///
/// This is the only writer of the fetch state. Index changes go through
/// [`Session::advance`] and [`Session::retreat`]; each one that moves the
/// index puts the state back to [`FetchState::Fetching`] and dispatches
/// exactly one request. Completions are applied from [`Session::poll`] or
/// [`Session::wait`], and only the completion for the latest request is
/// allowed to replace the state.
pub struct Session {
    navigator: Navigator,
    retriever: Retriever,
    fetch_state: FetchState,
    latest: Option<RequestTag>,
    next_seq: u64,
}

impl Session {
    /// Creates the session and issues the fetch for `start`.
    pub fn new(source: Arc<dyn ChapterSource>, start: ChapterIndex) -> Self {
        let mut session = Self {
            navigator: Navigator::new(start),
            retriever: Retriever::new(source),
            fetch_state: FetchState::Fetching,
            latest: None,
            next_seq: 0,
        };
        session.fetch(start);
        session
    }

    pub fn current_index(&self) -> ChapterIndex {
        self.navigator.current()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    pub fn at_lower_bound(&self) -> bool {
        self.navigator.at_lower_bound()
    }

    pub fn at_upper_bound(&self) -> bool {
        self.navigator.at_upper_bound()
    }

    /// Number of requests dispatched since the session was created.
    pub fn requests_issued(&self) -> u64 {
        self.next_seq
    }

    /// Moves to the next chapter. Returns `false` (and fetches nothing) at 114.
    pub fn advance(&mut self) -> bool {
        match self.navigator.advance() {
            Some(index) => {
                self.fetch(index);
                true
            }
            None => false,
        }
    }

    /// Moves to the previous chapter. Returns `false` (and fetches nothing) at 1.
    pub fn retreat(&mut self) -> bool {
        match self.navigator.retreat() {
            Some(index) => {
                self.fetch(index);
                true
            }
            None => false,
        }
    }

    fn fetch(&mut self, index: ChapterIndex) {
        // Fetching must be visible before the request leaves.
        self.fetch_state = FetchState::Fetching;
        self.next_seq += 1;
        let tag = RequestTag {
            index,
            seq: self.next_seq,
        };
        self.latest = Some(tag);
        self.retriever.dispatch(tag);
    }

    fn apply(&mut self, completion: Completion) -> Applied {
        let is_latest = self.latest == Some(completion.tag);
        if is_latest && self.fetch_state.is_fetching() {
            self.fetch_state = completion.state;
            Applied::Current
        } else {
            log::debug!(
                "Discarding response for chapter {} (request #{}), now on chapter {}",
                completion.tag.index,
                completion.tag.seq,
                self.navigator.current()
            );
            Applied::Stale
        }
    }

    /// Applies every completion that is already waiting. Returns `true` when
    /// the fetch state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.retriever.try_next() {
            changed |= self.apply(completion) == Applied::Current;
        }
        changed
    }

    /// Blocks for at most `timeout` for the next completion and applies it.
    pub fn wait(&mut self, timeout: Duration) -> Option<Applied> {
        let completion = self.retriever.next_timeout(timeout)?;
        Some(self.apply(completion))
    }

    /// Blocks until the latest request settles or `timeout` elapses. A
    /// timeout too large to form a deadline waits without one.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        while self.fetch_state.is_fetching() {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() || self.wait(remaining).is_none() {
                break;
            }
        }
        self.fetch_state.is_settled()
    }
}

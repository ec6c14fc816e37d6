use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::catalog::FetchFailure;
use crate::models::{ChapterIndex, ChapterRecord, FetchState};

/// Anything that can produce one chapter on demand.
pub trait ChapterSource: Send + Sync {
    fn fetch_chapter(&self, index: ChapterIndex) -> Result<ChapterRecord, FetchFailure>;
}

/// Identifies one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub index: ChapterIndex,
    pub seq: u64,
}

/// A settled request travelling back to the owner of the fetch state.
#[derive(Debug)]
pub struct Completion {
    pub tag: RequestTag,
    pub state: FetchState,
}

/// Runs fetches off the caller's thread and hands results back over a channel.
pub struct Retriever {
    source: Arc<dyn ChapterSource>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Retriever {
    pub fn new(source: Arc<dyn ChapterSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Fetches `index` and settles the result. Failures are logged here and
    /// never travel further than this function.
    pub fn resolve(source: &dyn ChapterSource, index: ChapterIndex) -> FetchState {
        match source.fetch_chapter(index) {
            Ok(record) => FetchState::Loaded(record),
            Err(err @ FetchFailure::Miss { .. }) => {
                log::info!("Chapter {} not found: {}", index, err);
                FetchState::Absent
            }
            Err(err) => {
                log::warn!("Fetching chapter {} failed ({}): {}", index, err.kind(), err);
                FetchState::Absent
            }
        }
    }

    /// Starts one fetch for `tag.index` on a worker thread. Every dispatch
    /// reports exactly one completion, even if the source panics.
    pub fn dispatch(&self, tag: RequestTag) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        log::info!("Fetching chapter {} (request #{})", tag.index, tag.seq);

        thread::spawn(move || {
            let state = panic::catch_unwind(AssertUnwindSafe(|| {
                Self::resolve(source.as_ref(), tag.index)
            }))
            .unwrap_or_else(|_| {
                log::error!("Fetching chapter {} panicked", tag.index);
                FetchState::Absent
            });
            // The receiver is gone only when the session was dropped.
            let _ = tx.send(Completion { tag, state });
        });
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

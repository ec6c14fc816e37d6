use crate::models::ChapterIndex;

/// Owns the current chapter and the two commands that may move it.
///
/// The navigator never talks to the network. A command that actually moves
/// the index returns the new index so the caller can schedule one fetch for
/// it; a command at a bound returns `None` and nothing else happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    current: ChapterIndex,
}

impl Navigator {
    pub fn new(start: ChapterIndex) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> ChapterIndex {
        self.current
    }

    pub fn advance(&mut self) -> Option<ChapterIndex> {
        let next = self.current.next()?;
        self.current = next;
        Some(next)
    }

    pub fn retreat(&mut self) -> Option<ChapterIndex> {
        let prev = self.current.prev()?;
        self.current = prev;
        Some(prev)
    }

    pub fn at_lower_bound(&self) -> bool {
        self.current.is_first()
    }

    pub fn at_upper_bound(&self) -> bool {
        self.current.is_last()
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Position of a chapter in the catalog, always within `1..=114`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterIndex(u8);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("chapter must be a number between 1 and 114, got '{input}'")]
pub struct InvalidChapter {
    pub input: String,
}

impl ChapterIndex {
    pub const FIRST: ChapterIndex = ChapterIndex(1);
    pub const LAST: ChapterIndex = ChapterIndex(114);

    pub fn new(value: u32) -> Option<Self> {
        if (Self::FIRST.0 as u32..=Self::LAST.0 as u32).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// The following chapter, or `None` at the upper bound.
    pub fn next(self) -> Option<Self> {
        Self::new(self.get() + 1)
    }

    /// The preceding chapter, or `None` at the lower bound.
    pub fn prev(self) -> Option<Self> {
        self.get().checked_sub(1).and_then(Self::new)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl Default for ChapterIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for ChapterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChapterIndex {
    type Err = InvalidChapter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidChapter {
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChapterName {
    pub long: String,
    pub short_name: String,
    pub translated_name: Option<String>,
    pub transliterated_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerseRecord {
    pub arabic_text: String,
    pub transliterated_text: Option<String>,
}

/// Normalized display model for one chapter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChapterRecord {
    pub number_of_verses: u32,
    pub name: ChapterName,
    pub verses: Vec<VerseRecord>,
}

/// What the presentation layer renders for the current chapter.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Fetching,
    Loaded(ChapterRecord),
    /// No usable data for the current chapter. Not the same as zero verses.
    Absent,
}

impl FetchState {
    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchState::Fetching)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_fetching()
    }

    pub fn record(&self) -> Option<&ChapterRecord> {
        match self {
            FetchState::Loaded(record) => Some(record),
            _ => None,
        }
    }
}

impl Default for FetchState {
    fn default() -> Self {
        FetchState::Fetching
    }
}

//! Render-time view of the session.
//!
//! Front-ends never look at optional record fields directly. They render a
//! [`Screen`], in which every missing field has already been replaced by the
//! matching fallback label.

use textwrap::Options;

use crate::models::{ChapterRecord, FetchState};
use crate::settings::Labels;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Loading(&'a str),
    NotFound(&'a str),
    Chapter(ChapterView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterView<'a> {
    pub long_name: &'a str,
    pub translated_name: &'a str,
    pub transliterated_name: &'a str,
    pub verses: VersesView<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VersesView<'a> {
    /// The chapter loaded but carries no verses.
    Empty(&'a str),
    Listed(Vec<VerseView<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerseView<'a> {
    /// 1-based position in the source order.
    pub number: usize,
    pub arabic: &'a str,
    pub transliteration: &'a str,
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

impl<'a> Screen<'a> {
    pub fn new(state: &'a FetchState, labels: &'a Labels) -> Self {
        match state {
            FetchState::Fetching => Screen::Loading(&labels.loading),
            FetchState::Absent => Screen::NotFound(&labels.chapter_not_found),
            FetchState::Loaded(record) => Screen::Chapter(ChapterView::new(record, labels)),
        }
    }

    /// Plain text rendering, wrapped to `width` columns.
    pub fn to_plain_text(&self, width: usize, show_transliteration: bool) -> String {
        let width = width.max(20);
        let options = Options::new(width);
        let mut out: Vec<String> = Vec::new();

        match self {
            Screen::Loading(text) | Screen::NotFound(text) => out.push(text.to_string()),
            Screen::Chapter(view) => {
                out.push(view.long_name.to_string());
                out.push(view.translated_name.to_string());
                out.push(view.transliterated_name.to_string());
                out.push("-".repeat(width.min(40)));

                match &view.verses {
                    VersesView::Empty(text) => out.push(text.to_string()),
                    VersesView::Listed(verses) => {
                        for verse in verses {
                            out.push(String::new());
                            out.push(format!("({})", verse.number));
                            out.extend(
                                textwrap::wrap(verse.arabic, &options)
                                    .into_iter()
                                    .map(|line| line.into_owned()),
                            );
                            if show_transliteration {
                                out.extend(
                                    textwrap::wrap(verse.transliteration, &options)
                                        .into_iter()
                                        .map(|line| line.into_owned()),
                                );
                            }
                        }
                    }
                }
            }
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

impl<'a> ChapterView<'a> {
    pub fn new(record: &'a ChapterRecord, labels: &'a Labels) -> Self {
        let verses = if record.verses.is_empty() {
            VersesView::Empty(&labels.verses_not_found)
        } else {
            VersesView::Listed(
                record
                    .verses
                    .iter()
                    .enumerate()
                    .map(|(i, verse)| VerseView {
                        number: i + 1,
                        arabic: &verse.arabic_text,
                        transliteration: or_fallback(
                            verse.transliterated_text.as_deref(),
                            &labels.transliteration_not_found,
                        ),
                    })
                    .collect(),
            )
        };

        Self {
            long_name: or_fallback(Some(record.name.long.as_str()), &labels.long_name_not_found),
            translated_name: or_fallback(
                record.name.translated_name.as_deref(),
                &labels.translation_not_found,
            ),
            transliterated_name: or_fallback(
                record.name.transliterated_name.as_deref(),
                &labels.translation_not_found,
            ),
            verses,
        }
    }
}

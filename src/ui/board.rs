use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::view::{ChapterView, Screen, VersesView};

/// Board widget for rendering one chapter screen
pub struct Board {
    show_transliteration: bool,
    scroll: u16,
}

impl Board {
    pub fn new() -> Self {
        Self {
            show_transliteration: true,
            scroll: 0,
        }
    }

    pub fn with_transliteration(mut self, show: bool) -> Self {
        self.show_transliteration = show;
        self
    }

    pub fn with_scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, screen: &Screen) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let lines = self.lines(screen);
        let mut paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        if matches!(screen, Screen::Chapter(_)) {
            paragraph = paragraph.scroll((self.scroll, 0));
        }
        frame.render_widget(paragraph, inner_area);
    }

    pub fn lines(&self, screen: &Screen) -> Vec<Line<'static>> {
        match screen {
            Screen::Loading(text) => vec![Line::from(Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))],
            Screen::NotFound(text) => vec![Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))],
            Screen::Chapter(view) => self.chapter_lines(view),
        }
    }

    fn chapter_lines(&self, view: &ChapterView) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                view.long_name.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(view.translated_name.to_string()).alignment(Alignment::Center),
            Line::from(Span::styled(
                view.transliterated_name.to_string(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
        ];

        match &view.verses {
            VersesView::Empty(text) => lines.push(Line::from(text.to_string())),
            VersesView::Listed(verses) => {
                for verse in verses {
                    lines.push(Line::from(Span::styled(
                        format!("({})", verse.number),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )));
                    lines.push(
                        Line::from(Span::styled(
                            verse.arabic.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Right),
                    );
                    if self.show_transliteration {
                        lines.push(Line::from(Span::styled(
                            verse.transliteration.to_string(),
                            Style::default().add_modifier(Modifier::ITALIC),
                        )));
                    }
                    lines.push(Line::from(""));
                }
            }
        }

        lines
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::VerseView;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn view(verses: VersesView<'static>) -> ChapterView<'static> {
        ChapterView {
            long_name: "long",
            translated_name: "translated",
            transliterated_name: "transliterated",
            verses,
        }
    }

    #[test]
    fn test_board_new() {
        let board = Board::new();
        assert!(board.show_transliteration);
        assert_eq!(board.scroll, 0);
    }

    #[test]
    fn verse_lines_follow_the_header() {
        let verses = VersesView::Listed(vec![
            VerseView {
                number: 1,
                arabic: "a1",
                transliteration: "t1",
            },
            VerseView {
                number: 2,
                arabic: "a2",
                transliteration: "t2",
            },
        ]);
        let screen = Screen::Chapter(view(verses));
        let lines: Vec<String> = Board::new().lines(&screen).iter().map(plain).collect();

        assert_eq!(
            lines,
            vec![
                "long", "translated", "transliterated", "", "(1)", "a1", "t1", "", "(2)", "a2",
                "t2", ""
            ]
        );
    }

    #[test]
    fn transliteration_can_be_hidden() {
        let verses = VersesView::Listed(vec![VerseView {
            number: 1,
            arabic: "a1",
            transliteration: "t1",
        }]);
        let screen = Screen::Chapter(view(verses));
        let lines: Vec<String> = Board::new()
            .with_transliteration(false)
            .lines(&screen)
            .iter()
            .map(plain)
            .collect();
        assert!(!lines.contains(&"t1".to_string()));
    }

    #[test]
    fn empty_chapter_shows_marker() {
        let screen = Screen::Chapter(view(VersesView::Empty("No verses found!")));
        let lines: Vec<String> = Board::new().lines(&screen).iter().map(plain).collect();
        assert_eq!(lines.last().map(String::as_str), Some("No verses found!"));
    }
}

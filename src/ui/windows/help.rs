use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::settings::Keymap;

pub struct HelpWindow;

impl HelpWindow {
    pub fn help_lines(keymap: &Keymap) -> Vec<String> {
        vec![
            " Key Bindings:".to_string(),
            format!("   {:<18}Next Chapter", format!("{} / Right", keymap.next_chapter)),
            format!("   {:<18}Prev Chapter", format!("{} / Left", keymap.prev_chapter)),
            format!("   {:<18}Line Down", format!("{} / Down", keymap.scroll_down)),
            format!("   {:<18}Line Up", format!("{} / Up", keymap.scroll_up)),
            format!("   {:<18}Help", keymap.help),
            format!("   {:<18}Quit / Close Window", format!("{} / Esc", keymap.quit)),
        ]
    }

    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap) {
        let help_content: Vec<Line> = Self::help_lines(keymap)
            .into_iter()
            .map(Line::from)
            .collect();

        let max_width = help_content.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let popup_area =
            super::centered_popup_area(area, max_width + 4, help_content.len() as u16 + 2);

        frame.render_widget(Clear, popup_area);

        let help_paragraph =
            Paragraph::new(help_content).block(Block::default().title("Help").borders(Borders::ALL));

        frame.render_widget(help_paragraph, popup_area);
    }
}

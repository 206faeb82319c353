pub(crate) mod convert;
pub(crate) mod dashboard;
pub(crate) mod entry;
pub(crate) mod transactions;

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};

use super::theme::Palette;

pub(crate) fn titled_block<'a>(title: impl Into<String>, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(format!(" {} ", title.into()), p.title_style()))
}

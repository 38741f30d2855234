use super::app::TuiApp;
use super::state::{FocusPane, GALLERY_COLUMNS};
use crate::gallery::{Screen, Selection};
use crate::source::ImageSource;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Accent used by the welcome button and the modal actions
const ACCENT: Color = Color::Rgb(0x84, 0x15, 0x84);
/// Event card background
const EVENT_CARD: Color = Color::Rgb(0xf7, 0xc1, 0xc1);

const WATCH_CARD_WIDTH: u16 = 24;
const WATCH_LIST_HEIGHT: u16 = 6;
const EVENT_CARD_HEIGHT: u16 = 5;
const GALLERY_ROW_HEIGHT: u16 = 3;

/// Main rendering function
pub fn render<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame) {
    let size = f.area();

    // Main layout: content area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    match app.session.screen() {
        Screen::Welcome => render_welcome(app, f, main_chunks[0]),
        Screen::InApp => render_in_app(app, f, main_chunks[0]),
    }

    render_status_bar(app, f, main_chunks[1]);

    if let Selection::Viewing(url) = app.session.selection() {
        render_detail_modal(url.as_str(), f, size);
    }
}

/// Welcome screen: slideshow background, greeting and the Explore button
fn render_welcome<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame, area: Rect) {
    let rotation = app.session.background_rotation();
    let background = match rotation.current() {
        Some(url) => format!("Background {}/{}: {}", rotation.index() + 1, rotation.len(), url),
        None => "Loading backgrounds...".to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            truncate_to_width(&background, area.width.saturating_sub(4) as usize),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to the Fun World!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Tap below to explore amazing content!"),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "  Explore (Enter)  ",
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// In-app screen: header, watch list, event card, gallery
fn render_in_app<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Header
            Constraint::Length(WATCH_LIST_HEIGHT), // Watch list
            Constraint::Length(EVENT_CARD_HEIGHT), // Countdown card
            Constraint::Min(0),                    // Gallery
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_watch_list(app, f, chunks[1]);
    render_event_card(f, chunks[2]);
    render_gallery(app, f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled("It's Fun Time!", Style::default().add_modifier(Modifier::BOLD))),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(" A ", Style::default().fg(Color::Black).bg(Color::Gray)))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn section_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

/// Horizontal strip of watch list cards, scrolled to keep the highlight visible
fn render_watch_list<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame, area: Rect) {
    let focused = app.state.focus == FocusPane::WatchList;
    let block = section_block("Watch List", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = app.session.state().watch_list();
    if entries.is_empty() {
        f.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }

    let per_screen = (inner.width / WATCH_CARD_WIDTH).max(1) as usize;
    let first = app.state.watch_index.saturating_sub(per_screen - 1);

    for (slot, (index, entry)) in entries.iter().enumerate().skip(first).take(per_screen).enumerate() {
        let card = Rect {
            x: inner.x + slot as u16 * WATCH_CARD_WIDTH,
            y: inner.y,
            width: WATCH_CARD_WIDTH.min(inner.width),
            height: inner.height,
        };
        let highlighted = focused && index == app.state.watch_index;
        let text_width = card.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(truncate_to_width(entry.url.file_name(), text_width)),
            Line::from(Span::styled(
                truncate_to_width(&entry.label, text_width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(card_block(highlighted)),
            card,
        );
    }
}

fn render_event_card(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Tick Tock...", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "07 : 23 : 48",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Black).bg(EVENT_CARD)),
        area,
    );
}

/// Two-column gallery grid. Records the viewport height for pagination.
fn render_gallery<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame, area: Rect) {
    let focused = app.state.focus == FocusPane::Gallery;
    let block = section_block("Infinite Gallery", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = (inner.height / GALLERY_ROW_HEIGHT) as usize;
    app.state.set_viewport_rows(rows);

    let images = app.session.state().gallery();
    if images.is_empty() {
        f.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }

    let column_width = inner.width / GALLERY_COLUMNS as u16;
    let first = app.state.gallery_scroll_row * GALLERY_COLUMNS;

    for (offset, url) in images.iter().skip(first).take(rows * GALLERY_COLUMNS).enumerate() {
        let index = first + offset;
        let row = (offset / GALLERY_COLUMNS) as u16;
        let column = (offset % GALLERY_COLUMNS) as u16;
        let cell = Rect {
            x: inner.x + column * column_width,
            y: inner.y + row * GALLERY_ROW_HEIGHT,
            width: column_width,
            height: GALLERY_ROW_HEIGHT,
        };
        let highlighted = focused && index == app.state.gallery_index;
        f.render_widget(
            Paragraph::new(truncate_to_width(url.file_name(), column_width.saturating_sub(2) as usize))
                .alignment(Alignment::Center)
                .block(card_block(highlighted)),
            cell,
        );
    }
}

fn card_block(highlighted: bool) -> Block<'static> {
    let style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default().borders(Borders::ALL).border_style(style)
}

/// Detail view overlay (centered)
fn render_detail_modal(url: &str, f: &mut Frame, area: Rect) {
    let dialog_width = 70.min(area.width);
    let dialog_height = 9.min(area.height);

    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    let button = Style::default().fg(Color::White).bg(ACCENT);
    let lines = vec![
        Line::from(""),
        Line::from(url.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Download (D) ", button),
            Span::raw("   "),
            Span::styled(" Add to Favorites (F) ", button),
            Span::raw("   "),
            Span::styled(" Close (C) ", button),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Image")
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    // Clear area and render dialog
    f.render_widget(Clear, dialog_area);
    f.render_widget(paragraph, dialog_area);
}

fn render_status_bar<S: ImageSource>(app: &TuiApp<S>, f: &mut Frame, area: Rect) {
    let state = app.session.state();

    let hints = match (app.session.screen(), app.session.selection().is_viewing()) {
        (Screen::Welcome, _) => "Enter: Explore | q: Quit",
        (Screen::InApp, true) => "d: Download | f: Favorite | c/Esc: Close",
        (Screen::InApp, false) => "Tab: Switch pane | Arrows: Move | Enter: View | q: Quit",
    };

    let left = match app.state.status() {
        Some(message) => format!("{} | {}", message, hints),
        None => hints.to_string(),
    };
    let right = match app.session.screen() {
        Screen::Welcome => String::new(),
        Screen::InApp => format!(
            "Page {} | {} images | {} favorites ",
            state.cursor(),
            state.gallery().len(),
            state.favorites().len()
        ),
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);

    let style = Style::default().fg(Color::Black).bg(Color::Gray);
    f.render_widget(
        Paragraph::new(truncate_to_width(&left, chunks[0].width as usize)).style(style),
        chunks[0],
    );
    f.render_widget(Paragraph::new(right).style(style), chunks[1]);
}

/// Truncate by display width (East Asian characters take 2 cells), adding "..."
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut truncated = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if current_width + ch_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }

    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("abc.png", 10), "abc.png");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_to_width("abcdefghij.png", 8), "abcde...");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each character is 2 cells wide
        assert_eq!(truncate_to_width("画像画像画像", 7), "画像...");
    }
}

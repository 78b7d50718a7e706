use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::{App, Field, Mode, StatusKind};

const LABEL_WIDTH: u16 = 16;

/// Render the song form and any open dialog.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(6), // Song details
            Constraint::Length(4), // Marker entry
            Constraint::Min(5),    // Marker list
            Constraint::Length(5), // Streaming links
            Constraint::Length(4), // Status / help
        ])
        .split(area);

    render_title(frame, chunks[0]);
    render_fields(
        frame,
        app,
        chunks[1],
        "Song",
        &[Field::Title, Field::Artist, Field::VideoUrl, Field::Description],
    );
    render_fields(
        frame,
        app,
        chunks[2],
        "Timestamps & Annotations (Enter to add)",
        &[Field::MarkerTime, Field::MarkerText],
    );
    render_markers(frame, app, chunks[3]);
    render_fields(
        frame,
        app,
        chunks[4],
        "Streaming Links (optional)",
        &[Field::Spotify, Field::AppleMusic, Field::YoutubeMusic],
    );
    render_status(frame, app, chunks[5]);

    match &app.mode {
        Mode::Editing => {}
        Mode::ConfirmClear => {
            render_dialog(frame, "Clear Form", "Are you sure you want to clear all fields? (y/n)");
        }
        Mode::ConfirmPublish(page) => render_dialog(
            frame,
            "Success!",
            &format!(
                "Song page created: {}\n\nWould you like to commit and push it now? (y/n)",
                page.file_name
            ),
        ),
        Mode::ConfirmAnother => {
            render_dialog(frame, "Continue?", "Would you like to add another song? (y/n)");
        }
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🎵 Add New Song")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect, title: &str, fields: &[Field]) {
    let lines: Vec<Line> = fields
        .iter()
        .map(|&field| {
            let focused = app.focus == field && app.mode == Mode::Editing;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let value = app.field_value(field).unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH as usize),
                    label_style,
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if app.mode != Mode::Editing {
        return;
    }
    if let Some(row) = fields.iter().position(|&f| f == app.focus) {
        let typed = app.field_value(app.focus).unwrap_or_default().chars().count() as u16;
        let x = (inner.x + LABEL_WIDTH + typed).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y + row as u16));
    }
}

fn render_markers(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Field::Markers && app.mode == Mode::Editing;
    let markers = app.draft.markers();

    let items: Vec<ListItem> = markers
        .iter()
        .map(|marker| ListItem::new(format!("{} - {}", marker.time, marker.text)))
        .collect();

    let title = if focused {
        format!("Markers ({}) - Del to remove selected", markers.len())
    } else {
        format!("Markers ({})", markers.len())
    };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default();
    if focused && !markers.is_empty() {
        state.select(Some(app.selected_marker));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let help = "  Tab/Shift-Tab Move  Enter Add marker  Ctrl-S Create  Ctrl-L Clear  Esc Quit";
    let paragraph = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
            };
            Paragraph::new(format!("  {}", status.message)).style(Style::default().fg(color))
        }
        None => Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        paragraph
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_dialog(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(60, 7, frame.area());
    let dialog = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title.to_string()),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// A `width`% wide, `height` rows tall rectangle centred in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width) / 2),
            Constraint::Percentage(width),
            Constraint::Percentage((100 - width) / 2),
        ])
        .split(vertical[1])[1]
}

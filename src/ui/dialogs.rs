use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget},
};

use crate::pattern::BackgroundPattern;
use crate::settings::{SettingsDialog, SettingsField};
use crate::theme::{ColorTheme, ThemeName};

/// Rect of fixed size centered in `r`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

fn dialog_block(title: &str, theme: &ColorTheme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

pub fn render_settings(
    dialog: &SettingsDialog,
    pattern: BackgroundPattern,
    theme: &ColorTheme,
    area: Rect,
    buf: &mut Buffer,
) {
    let popup = centered_rect(44, 13, area);
    Clear.render(popup, buf);

    let block = dialog_block("Timer Settings", theme);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(1), // description
            Constraint::Length(1),
            Constraint::Length(1), // duration label
            Constraint::Length(1), // slider
            Constraint::Length(1),
            Constraint::Length(1), // pattern label
            Constraint::Length(2), // pattern choices
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let focused = |field| {
        if dialog.focus == field {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    Paragraph::new("Adjust your deep work session duration.")
        .style(Style::default().fg(Color::DarkGray))
        .render(chunks[0], buf);

    Paragraph::new(format!("Session Duration: {} minutes", dialog.draft.minutes()))
        .style(focused(SettingsField::Duration))
        .render(chunks[2], buf);

    let range = dialog.draft.range();
    Gauge::default()
        .gauge_style(Style::default().fg(theme.gradient(dialog.draft.position())))
        .ratio(dialog.draft.position())
        .label(format!("{}  ◂ {} ▸  {}", range.min, dialog.draft.minutes(), range.max))
        .render(chunks[3], buf);

    Paragraph::new("Background Pattern")
        .style(focused(SettingsField::Pattern))
        .render(chunks[5], buf);

    let choices = BackgroundPattern::ALL
        .iter()
        .map(|p| {
            if *p == pattern {
                Span::styled(
                    format!("[{p}]"),
                    Style::default()
                        .fg(Color::Black)
                        .bg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {p} "), Style::default().fg(Color::Gray))
            }
        })
        .flat_map(|s| [s, Span::raw(" ")])
        .collect::<Vec<_>>();
    Paragraph::new(Line::from(choices))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .render(chunks[6], buf);

    Paragraph::new("↑↓ field  ←→ change  Enter apply  Esc close")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
}

pub fn render_theme_picker(cursor: usize, current: ThemeName, theme: &ColorTheme, area: Rect, buf: &mut Buffer) {
    let height = ThemeName::ALL.len() as u16 + 4;
    let popup = centered_rect(30, height, area);
    Clear.render(popup, buf);

    let block = dialog_block("Theme", theme);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let mut lines = ThemeName::ALL
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let swatch = name.colors();
            let marker = if i == cursor { "▶ " } else { "  " };
            let check = if *name == current { " ✓" } else { "" };
            let label_style = if i == cursor {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled("●", Style::default().fg(swatch.from)),
                Span::styled("●", Style::default().fg(swatch.via)),
                Span::styled("●", Style::default().fg(swatch.to)),
                Span::raw(" "),
                Span::styled(name.label(), label_style),
                Span::raw(check),
            ])
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter select  Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).render(inner, buf);
}

pub mod clock;
pub mod dialogs;

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Overlay},
    pattern::PatternFill,
    prefs::PreferenceStore,
    session::Phase,
    theme::ColorTheme,
    tick::TickSource,
    title::APP_TITLE,
    ui::clock::{big_text, GLYPH_HEIGHT},
};

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 17;
// frames per half pulse at the default frame rate
const PULSE_FRAMES: u64 = 5;

/// Title text with each character stepped along the theme gradient
fn gradient_line(text: &str, theme: &ColorTheme) -> Line<'static> {
    let n = text.chars().count().max(2) - 1;
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            Span::styled(
                c.to_string(),
                Style::default()
                    .fg(theme.gradient(i as f64 / n as f64))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

fn key_hint(
    key: &'static str,
    label: &'static str,
    enabled: bool,
    accent: Color,
) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )
    };
    vec![
        Span::styled(key, key_style),
        Span::styled(format!(" {label} "), label_style),
    ]
}

impl<T: TickSource, P: PreferenceStore> Widget for &App<T, P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.themes.theme();
        let timer = &self.timer;
        let running = timer.is_running();

        PatternFill::new(
            self.pattern,
            Style::default().fg(theme.secondary).add_modifier(Modifier::DIM),
        )
        .render(area, buf);

        let card = dialogs::centered_rect(CARD_WIDTH, CARD_HEIGHT, area);
        Clear.render(card, buf);

        let border_color = if running { theme.primary } else { theme.via };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(gradient_line(&format!(" {APP_TITLE} "), &theme))
            .title_alignment(Alignment::Center);
        let inner = block.inner(card);
        block.render(card, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(1),                   // phase
                Constraint::Length(1),
                Constraint::Length(GLYPH_HEIGHT as u16), // clock
                Constraint::Length(1),                   // finish time
                Constraint::Length(1),
                Constraint::Length(1), // progress
                Constraint::Length(1),
                Constraint::Length(1), // keys
                Constraint::Length(1), // status
                Constraint::Min(0),
            ])
            .split(inner);

        // phase line, pulsing while running
        let phase = match timer.phase() {
            Phase::Running => {
                let pulse = if (self.frame / PULSE_FRAMES) % 2 == 0 { "●" } else { "○" };
                Span::styled(
                    format!("{pulse} Focus"),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                )
            }
            Phase::Completed => Span::styled(
                "Time's up!",
                Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
            ),
            Phase::Idle if timer.session().is_pristine() => {
                Span::styled("Ready", Style::default().fg(Color::Gray))
            }
            Phase::Idle => Span::styled("Paused", Style::default().fg(Color::Yellow)),
        };
        Paragraph::new(Line::from(phase))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        // clock: block digits when they fit, plain text otherwise
        let display = timer.display();
        let rows = big_text(&display);
        let clock_style = Style::default()
            .fg(if running { theme.primary } else { Color::White })
            .add_modifier(Modifier::BOLD);
        let clock_lines = if rows[0].width() <= usize::from(chunks[2].width) {
            rows.into_iter()
                .map(|r| Line::from(Span::styled(r, clock_style)))
                .collect::<Vec<_>>()
        } else {
            vec![Line::from(""), Line::from(""), Line::from(Span::styled(display, clock_style))]
        };
        Paragraph::new(clock_lines)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        if let Some(end) = timer.finish_time(Local::now()) {
            Paragraph::new(Span::styled(
                format!("ends at {}", end.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }

        let progress = timer.progress();
        Gauge::default()
            .gauge_style(Style::default().fg(theme.gradient(progress)).bg(Color::Black))
            .ratio(progress)
            .label(format!("{:.0}%", progress * 100.0))
            .render(chunks[5], buf);

        let keys = [
            key_hint(
                "␣",
                if running { "pause" } else { "start" },
                self.can_toggle(),
                theme.primary,
            ),
            key_hint("r", "reset", self.can_reset(), theme.primary),
            key_hint("s", "settings", true, theme.primary),
            key_hint("t", "theme", true, theme.primary),
            key_hint("q", "quit", true, theme.primary),
        ]
        .concat();
        Paragraph::new(Line::from(keys))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        if let Some(status) = &self.status {
            Paragraph::new(Span::styled(
                status.as_str(),
                Style::default().fg(theme.secondary).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);
        }

        match &self.overlay {
            Overlay::None => {}
            Overlay::Settings(dialog) => {
                dialogs::render_settings(dialog, self.pattern, &theme, area, buf)
            }
            Overlay::Themes { cursor } => {
                dialogs::render_theme_picker(*cursor, self.themes.name(), &theme, area, buf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::BackgroundPattern;
    use crate::prefs::MemoryPreferenceStore;
    use crate::settings::SettingsDialog;
    use crate::theme::ThemeProvider;
    use crate::tick::ManualTickSource;
    use crate::timer::SessionTimer;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app(minutes: u32) -> App<ManualTickSource, MemoryPreferenceStore> {
        App::new(
            SessionTimer::with_minutes(minutes, ManualTickSource::new()),
            ThemeProvider::new(MemoryPreferenceStore::new()),
            BackgroundPattern::None,
        )
    }

    fn rendered(app: &App<ManualTickSource, MemoryPreferenceStore>, w: u16, h: u16) -> String {
        let area = Rect::new(0, 0, w, h);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_idle_screen_shows_title_and_ready() {
        let app = create_test_app(25);
        let s = rendered(&app, 80, 24);
        assert!(s.contains("DeepWork Timer"));
        assert!(s.contains("Ready"));
        assert!(s.contains("0%"));
    }

    #[test]
    fn test_narrow_terminal_falls_back_to_plain_clock() {
        let app = create_test_app(25);
        let s = rendered(&app, 20, 20);
        assert!(s.contains("25:00"));
    }

    #[test]
    fn test_running_screen_shows_finish_time() {
        let mut app = create_test_app(25);
        app.toggle();
        let s = rendered(&app, 80, 24);
        assert!(s.contains("Focus"));
        assert!(s.contains("ends at"));
        assert!(s.contains("pause"));
    }

    #[test]
    fn test_paused_screen() {
        let mut app = create_test_app(25);
        app.toggle();
        let stamp = app.timer.ticks().active_stamp().unwrap();
        app.on_tick(stamp);
        app.toggle();
        let s = rendered(&app, 80, 24);
        assert!(s.contains("Paused"));
        assert!(!s.contains("ends at"));
    }

    #[test]
    fn test_completed_screen() {
        let mut app = create_test_app(1);
        app.toggle();
        let stamp = app.timer.ticks().active_stamp().unwrap();
        while app.timer.is_running() {
            app.on_tick(stamp);
        }
        let s = rendered(&app, 80, 24);
        assert!(s.contains("Time's up!"));
        assert!(s.contains("100%"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = create_test_app(25);
        app.overlay = Overlay::Settings(SettingsDialog::open(25));
        assert!(rendered(&app, 80, 24).contains("Timer Settings"));

        app.overlay = Overlay::Themes { cursor: 0 };
        assert!(rendered(&app, 80, 24).contains("Monochrome"));
    }

    #[test]
    fn test_pattern_shows_around_card() {
        let mut app = create_test_app(25);
        app.pattern = BackgroundPattern::Grid;
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert_eq!(buffer[(0, 0)].symbol(), "┼");
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let app = create_test_app(120);
        for (w, h) in [(1, 1), (10, 3), (52, 17)] {
            rendered(&app, w, h);
        }
    }

    #[test]
    fn test_draw_through_terminal() {
        let app = create_test_app(25);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("DeepWork Timer"));
    }
}

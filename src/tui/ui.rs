//! TUI rendering with ratatui
//!
//! Draws the upload panel, busy indicator, results and status bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
    Frame,
};

use super::app::{App, InputMode};
use crate::render::{parse_color_token, EntryKind, ListEntry, RenderedResults, ScoreTier};

/// Busy indicator frames
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Main draw function, renders the entire TUI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let busy_height = if app.controller.is_busy() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Length(4),           // Upload panel
            Constraint::Length(busy_height), // Busy indicator
            Constraint::Min(5),              // Results
            Constraint::Length(3),           // Status bar
        ])
        .split(area);

    draw_header(frame, chunks[0], app);
    draw_upload_panel(frame, chunks[1], app);
    if app.controller.is_busy() {
        draw_busy(frame, chunks[2], app);
    }

    match app.controller.view() {
        Some(view) => draw_results(frame, chunks[3], app, view),
        None => draw_welcome(frame, chunks[3]),
    }

    draw_status_bar(frame, chunks[4], app);

    // Overlays (drawn last, on top)
    if let Some(ref message) = app.notification {
        draw_notification(frame, area, message);
    } else if app.show_help {
        draw_help_overlay(frame, area);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            " ATS Checker ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.endpoint),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" [{}]", app.controller.locale()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Selected file, or the path being typed
fn draw_upload_panel(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.controller.locale();

    let (title, body, border) = match app.mode {
        InputMode::PathInput => (
            " Path (Enter to select, Esc to cancel) ",
            Line::from(vec![
                Span::styled(" > ", Style::default().fg(Color::Yellow)),
                Span::raw(app.path_input.as_str()),
                Span::styled("█", Style::default().fg(Color::Yellow)),
            ]),
            Color::Yellow,
        ),
        InputMode::Normal => {
            let selector = app.controller.selector();
            let name_style = match selector.current() {
                Some(_) => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                None => Style::default().fg(Color::DarkGray),
            };
            let mut spans = vec![
                Span::raw(" 📄 "),
                Span::styled(selector.label(locale).to_string(), name_style),
            ];
            if let Some(file) = selector.current() {
                spans.push(Span::styled(
                    format!("  {}", file.human_size()),
                    Style::default().fg(Color::DarkGray),
                ));
                match selector.validate() {
                    Ok(_) => spans.push(Span::styled("  ✓", Style::default().fg(Color::Green))),
                    Err(e) => spans.push(Span::styled(
                        format!("  ⚠ {}", e.user_message(locale)),
                        Style::default().fg(Color::Yellow),
                    )),
                }
            }
            (" Resume (o: choose, drop a file, Enter: analyze) ", Line::from(spans), Color::Cyan)
        }
    };

    let panel = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(panel, area);
}

fn draw_busy(frame: &mut Frame, area: Rect, app: &App) {
    let strings = app.controller.locale().strings();
    let spinner = SPINNER_FRAMES[(app.frame_count as usize / 4) % SPINNER_FRAMES.len()];
    let sweep = (app.frame_count % 40) as f64 / 40.0;

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(sweep)
        .label(format!("{} {}", spinner, strings.analyzing));

    frame.render_widget(gauge, area);
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  ATS Checker",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Press 'o' and type a path, or drag a PDF/DOCX onto this window."),
        Line::from("  Then press Enter to analyze it."),
        Line::from(""),
        Line::from("  Press 'q' to quit."),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Welcome ");
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Score ring on the left, details on the right
fn draw_results(frame: &mut Frame, area: Rect, app: &App, view: &RenderedResults) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    draw_score(frame, chunks[0], app, view);
    draw_details(frame, chunks[1], app, view);
}

fn draw_score(frame: &mut Frame, area: Rect, app: &App, view: &RenderedResults) {
    let locale = app.controller.locale();
    let strings = locale.strings();
    let animator = app.controller.animator();
    let color = tier_color(view.tier);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", strings.heading_score))
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Ring
            Constraint::Length(2), // Tier
            Constraint::Min(0),    // Stats
        ])
        .split(inner);

    let ring = Gauge::default()
        .block(Block::default().padding(Padding::horizontal(1)))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(animator.ring_progress().clamp(0.0, 1.0))
        .label(Span::styled(
            format!("{}/100", animator.displayed()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(ring, rows[0]);

    let tier = Paragraph::new(Line::from(Span::styled(
        view.tier.label(locale),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(tier, rows[1]);

    let mut stats = vec![
        stat_line(strings.heading_word_count, view.word_count.to_string()),
        stat_line(strings.heading_found, view.found_count.to_string()),
        stat_line(strings.heading_missing, view.missing_count.to_string()),
    ];
    for check in &view.contact {
        let (mark, mark_color) = if check.present {
            ("✓", Color::Green)
        } else {
            ("⚠", Color::Yellow)
        };
        stats.push(Line::from(vec![
            Span::styled(format!(" {} ", mark), Style::default().fg(mark_color)),
            Span::raw(check.label),
        ]));
    }
    frame.render_widget(Paragraph::new(stats), rows[2]);
}

fn stat_line(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", key), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Found and missing sections, then advice
fn draw_details(frame: &mut Frame, area: Rect, app: &App, view: &RenderedResults) {
    let strings = app.controller.locale().strings();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_heading(strings.heading_found));
    lines.extend(view.found.iter().map(|entry| entry_line(entry, false)));
    lines.push(Line::from(""));

    lines.push(section_heading(strings.heading_missing));
    lines.extend(view.missing.iter().map(|entry| entry_line(entry, true)));
    lines.push(Line::from(""));

    lines.push(section_heading(strings.heading_advice));
    for (i, advice) in view.advice.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::raw(advice.as_str()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details (j/k to scroll) ")
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn section_heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry_line(entry: &ListEntry, missing_list: bool) -> Line<'_> {
    let (marker, style) = match entry.kind {
        EntryKind::AllSectionsPresent => ("  ", Style::default().fg(Color::Green)),
        EntryKind::NoKnownSections => ("  ", Style::default().fg(Color::DarkGray)),
        EntryKind::Unrecognized => (
            if missing_list { "✗ " } else { "✓ " },
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        EntryKind::Section(_) if missing_list => ("✗ ", Style::default().fg(Color::Red)),
        EntryKind::Section(_) => ("✓ ", Style::default().fg(Color::Green)),
    };
    Line::from(vec![
        Span::styled(format!("  {}", marker), style),
        Span::styled(entry.text.as_str(), style),
    ])
}

/// Ring and label colour for a tier
fn tier_color(tier: ScoreTier) -> Color {
    parse_color_token(tier.color_token())
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Draw status bar
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let left = Span::styled(
        format!(" {} ", app.status_message),
        Style::default().fg(Color::White),
    );

    let right = Span::styled(
        " ?:Help  o:Open  Enter:Analyze  r:Reset  j/k:Scroll  q:Quit ",
        Style::default().fg(Color::DarkGray),
    );

    let bar = Paragraph::new(Line::from(vec![left, right])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(bar, area);
}

/// Centered popup area
fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Blocking message; any key closes it
fn draw_notification(frame: &mut Frame, area: Rect, message: &str) {
    let popup_area = popup_rect(area, 56, 7);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Notice ")
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Draw help overlay popup
fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = popup_rect(area, 56, 20);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  KEYBOARD SHORTCUTS",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("  Resume", Style::default().fg(Color::Yellow))),
        Line::from("    o / /        Type a file path"),
        Line::from("    drop file    Drag onto the window"),
        Line::from("    Enter / s    Analyze"),
        Line::from("    r            Start over"),
        Line::from(""),
        Line::from(Span::styled("  Results", Style::default().fg(Color::Yellow))),
        Line::from("    j / ↓        Scroll down"),
        Line::from("    k / ↑        Scroll up"),
        Line::from("    g / Home     Back to top"),
        Line::from(""),
        Line::from(Span::styled("  General", Style::default().fg(Color::Yellow))),
        Line::from("    ?/F1         Show this help"),
        Line::from("    q/Esc        Quit"),
        Line::from("    Ctrl+C       Force quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::SubmitError;
    use crate::i18n::Locale;
    use crate::model::AnalysisResult;
    use crate::selector::SelectedFile;
    use crate::service::AnalysisService;
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct Unreachable;

    #[async_trait]
    impl AnalysisService for Unreachable {
        async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, SubmitError> {
            Err(SubmitError::Transport("offline".into()))
        }
    }

    fn english_app() -> App {
        let mut config = Config::default();
        config.general.locale = Locale::En;
        App::new(&config, Arc::new(Unreachable))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_idle_screen() {
        let app = english_app();
        let text = screen(&app);
        assert!(text.contains("ATS Checker"));
        assert!(text.contains("Choose a file"));
        assert!(text.contains("Welcome"));
    }

    #[test]
    fn test_results_screen() {
        let mut app = english_app();
        app.controller
            .select_file(SelectedFile::new("/tmp/resume.pdf", 2048));
        app.controller.begin_submit();
        app.controller.settle(Ok(AnalysisResult {
            score: 85,
            word_count: 420,
            found_sections: vec!["skills".into()],
            missing_sections: vec!["education".into()],
            advice: vec!["Quantify achievements".into()],
            has_email: None,
            has_phone: None,
        }));
        app.controller.animator_mut().run_to_end();

        let text = screen(&app);
        assert!(text.contains("85/100"));
        assert!(text.contains("Excellent!"));
        assert!(text.contains("Skills"));
        assert!(text.contains("Education"));
        assert!(text.contains("Quantify achievements"));
    }

    #[test]
    fn test_notification_overlay() {
        let mut app = english_app();
        app.notification = Some("Please choose a file first".into());
        let text = screen(&app);
        assert!(text.contains("Please choose a file first"));
        assert!(text.contains("Notice"));
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(tier_color(ScoreTier::Excellent), Color::Rgb(0x10, 0xb9, 0x81));
        assert_eq!(tier_color(ScoreTier::NeedsImprovement), Color::Rgb(0xef, 0x44, 0x44));
    }
}

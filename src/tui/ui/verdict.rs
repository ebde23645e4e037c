//! Prediction verdict view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::Prediction;
use crate::tui::styles::InclusionTheme;

/// Verdict state
#[derive(Debug, Clone)]
pub enum VerdictState {
    /// Completed with result
    Complete { prediction: Prediction },
    /// The submission failed; the session can continue
    Error { message: String },
}

/// Render the verdict screen
pub fn render_verdict(f: &mut Frame, area: Rect, state: &VerdictState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_verdict_header(f, chunks[0]);
    match state {
        VerdictState::Complete { prediction } => render_result(f, chunks[1], prediction),
        VerdictState::Error { message } => render_error(f, chunks[1], message),
    }
    render_verdict_footer(f, chunks[2]);
}

fn render_verdict_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", InclusionTheme::text()),
        Span::styled("Prediction", InclusionTheme::title()),
        Span::styled(" │ Bank account ownership", InclusionTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(InclusionTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_result(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let block = Block::default()
        .title(Span::styled(" Result ", InclusionTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(InclusionTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Verdict
            Constraint::Length(4), // Probability
            Constraint::Length(3), // Class breakdown
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let style = InclusionTheme::outcome(prediction.outcome);
    let icon = if prediction.is_positive() { "✅" } else { "❌" };

    let verdict = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", prediction.outcome),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(prediction.message(), InclusionTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(verdict, chunks[0]);

    let confidence = prediction.confidence();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Probability ", InclusionTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(InclusionTheme::border()),
        )
        .gauge_style(style)
        .ratio(confidence.clamp(0.0, 1.0))
        .label(format!("{:.2}%", confidence * 100.0));
    f.render_widget(gauge, chunks[1]);

    let breakdown = Paragraph::new(Line::from(vec![
        Span::styled("No account: ", InclusionTheme::text_secondary()),
        Span::styled(
            format!("{:.2}%", prediction.probabilities[0] * 100.0),
            InclusionTheme::text(),
        ),
        Span::styled("   Account: ", InclusionTheme::text_secondary()),
        Span::styled(
            format!("{:.2}%", prediction.probabilities[1] * 100.0),
            InclusionTheme::text(),
        ),
        Span::styled(
            format!("   at {}", prediction.created_at.format("%H:%M:%S UTC")),
            InclusionTheme::text_muted(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(breakdown, chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", InclusionTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, InclusionTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(InclusionTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_verdict_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Enter/Esc] ", InclusionTheme::key_hint()),
        Span::styled("Back to form ", InclusionTheme::key_desc()),
        Span::styled("[Q] ", InclusionTheme::key_hint()),
        Span::styled("Quit", InclusionTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(InclusionTheme::border()),
    );

    f.render_widget(footer, area);
}

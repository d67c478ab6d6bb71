use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::chat::{ChatMessage, ChatRole};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let banner_height = if app.chat.last_error().is_some() { 1 } else { 0 };

    // Main layout: header, transcript, input, error banner, footer
    let [header_area, chat_area, input_area, banner_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(banner_height),
        Constraint::Length(1),
    ])
    .areas(area);

    // Inner pane size for wrap and scroll calculations (minus borders).
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    render_header(frame, header_area);
    render_transcript(app, frame, chat_area);
    render_input(app, frame, input_area);
    if banner_height > 0 {
        render_banner(app, frame, banner_area);
    }
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Fit Chat ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_transcript(app: &App, frame: &mut Frame, area: Rect) {
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recommendations ");

    let messages = app.chat.transcript();
    let chat_text = if messages.is_empty() && !app.chat.loading() {
        Text::from(Span::styled(
            "Enter your measurements and fit issues...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in messages {
            match msg.role {
                ChatRole::User => {
                    lines.push(Line::from(Span::styled(
                        "You:",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )));
                    for line in msg.text.lines() {
                        lines.push(Line::from(line));
                    }
                    lines.push(Line::default());
                }
                ChatRole::Assistant => {
                    lines.push(Line::from(Span::styled(
                        "AI:",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )));
                    push_assistant_lines(&mut lines, msg);
                    lines.push(Line::default());
                }
            }
        }

        if app.chat.loading() {
            lines.push(Line::from(Span::styled(
                "AI:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Thinking{dots}"),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(chat, area);
}

/// A failed exchange renders as a single red line; a recommendation renders
/// as the summary plus whatever structured details the service included.
fn push_assistant_lines<'a>(lines: &mut Vec<Line<'a>>, msg: &'a ChatMessage) {
    if let Some(error_text) = &msg.error_text {
        for line in error_text.lines() {
            lines.push(Line::from(Span::styled(
                line,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        return;
    }

    for line in msg.text.lines() {
        lines.push(Line::from(Span::styled(
            line,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(reasoning) = &msg.reasoning {
        lines.push(labeled_line("Reasoning: ", reasoning, Color::Blue));
    }
    if let Some(fit_tips) = &msg.fit_tips {
        lines.push(labeled_line("Fit tips: ", fit_tips, Color::Magenta));
    }
    if let Some(issues) = msg.issues.as_ref().filter(|issues| !issues.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled(
                "Issues: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(issues.join(", ")),
        ]));
    }
    if let Some(confidence) = msg.confidence {
        let color = if confidence < 0.6 { Color::Yellow } else { Color::Green };
        lines.push(Line::from(Span::styled(
            format!("Confidence: {}%", (confidence * 100.0).round()),
            Style::default().fg(color),
        )));
    }
}

fn labeled_line<'a>(label: &'static str, text: &'a str, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(text),
    ])
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Your query ");

    // Horizontal scrolling keeps the cursor visible in a long draft.
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .chat
        .draft()
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_banner(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(error) = app.chat.last_error() {
        let banner = Paragraph::new(Span::styled(
            error,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(banner, area);
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Editing => " Enter send · Esc scroll mode · Ctrl-C quit ",
        InputMode::Normal => " j/k scroll · g/G top/bottom · i edit · q quit ",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

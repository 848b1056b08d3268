use quickstyle_engine::{
    Block as DocBlock, BlockType, Color as StyleColor, Presentation, block_class, presentation_for,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let state = app.state();
    let lines: Vec<Line> = state.blocks().map(block_line).collect();

    let caret = state.selection().focus.clone();
    let row = state.block_index(&caret.key).unwrap_or(0);
    let visible_rows = chunks[0].height.saturating_sub(2).max(1) as usize;
    let scroll = row.saturating_sub(visible_rows - 1);

    let editor = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("quickstyle"))
        .scroll((scroll as u16, 0));
    f.render_widget(editor, chunks[0]);

    if let Some(block) = state.block(&caret.key) {
        let x = chunks[0].x + 1 + caret_column(block, caret.offset);
        let y = chunks[0].y + 1 + (row - scroll) as u16;
        f.set_cursor_position(Position::new(x, y));
    }

    let status = Line::from(Span::styled(
        app.status().unwrap_or_default().to_string(),
        Style::default().fg(Color::Green),
    ));
    let help = Line::from(vec![
        Span::raw("Esc/^Q: Quit | "),
        Span::raw("^S: Save | "),
        Span::raw("^B/^I/^U: Bold/Italic/Underline | "),
        Span::raw("# * ** *** + space: shortcuts"),
    ]);
    f.render_widget(Paragraph::new(vec![status, help]), chunks[1]);
}

/// Marker drawn before a block's text
fn block_prefix(block: &DocBlock) -> String {
    let indent = "  ".repeat(block.depth() as usize);
    let marker = match block.kind() {
        BlockType::UnorderedListItem => "• ",
        BlockType::OrderedListItem => "1. ",
        BlockType::Blockquote => "│ ",
        _ => "",
    };
    format!("{indent}{marker}")
}

/// Terminal cells between the line start and the caret
fn caret_column(block: &DocBlock, offset: usize) -> u16 {
    let width = block_prefix(block).width() + block.text_until(offset).width();
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn block_style(kind: BlockType) -> Style {
    match block_class(&kind) {
        Some("header-one") => Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::UNDERLINED),
        Some("header-two") => Style::default().add_modifier(Modifier::BOLD),
        _ if kind == BlockType::CodeBlock => Style::default().fg(Color::Gray),
        _ => Style::default(),
    }
}

pub fn to_style(presentation: Presentation) -> Style {
    let mut style = Style::default();
    if let Some(StyleColor::Red) = presentation.color {
        style = style.fg(Color::Red);
    }
    if presentation.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if presentation.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if presentation.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if presentation.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if presentation.monospace {
        style = style.bg(Color::DarkGray);
    }
    style
}

/// One span per run of identically styled chars
pub fn block_line(block: &DocBlock) -> Line<'static> {
    let base = block_style(block.kind());
    let mut spans = vec![Span::styled(block_prefix(block), base)];

    let mut run = String::new();
    let mut run_style = None;
    for (c, styles) in block.text().chars().zip(block.styles()) {
        let style = base.patch(to_style(presentation_for(styles)));
        if run_style.is_some_and(|current| current != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or(base)));
        }
        run_style = Some(style);
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style.unwrap_or(base)));
    }

    Line::from(spans)
}

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::Input;

/// Draw one bordered input, placing the cursor when the field is active.
/// Masked fields draw an asterisk per character instead of the value.
#[expect(clippy::cast_possible_truncation)]
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    input: &Input,
    title: &str,
    masked: bool,
    active: bool,
) {
    let width = area.width.saturating_sub(3); // -2 for the border, -1 for the cursor

    let input_scroll = input.visual_scroll(width as usize);

    let value = if masked {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };

    let border_style = if active {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let field = Paragraph::new(value)
        .scroll((0, input_scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(border_style),
        );

    frame.render_widget(field, area);

    if active {
        frame.set_cursor_position((
            area.x
                + (input.visual_cursor().max(input_scroll) - input_scroll) as u16 // current end of text
                + 1, // just past the end of the text
            area.y + 1, // +1 row for the border/title
        ));
    }
}

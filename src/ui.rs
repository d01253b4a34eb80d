use crate::app::App;
use crate::form::{Field, TaskForm};
use crate::kanban_board::{group_by_status, BoardLayout};
use crate::task::Status;
use crossterm::event;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

const ADD_BUTTON: &str = " + Add New Task ";
const FORM_WIDTH: u16 = 50;
const FORM_HEIGHT: u16 = 14;

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        let mut layout = BoardLayout::default();
        terminal.draw(|f| layout = draw(f, app))?;
        app.set_layout(layout);

        if event::poll(tick_rate)? {
            app.handle_event(event::read()?);
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Render one frame and report where the columns ended up.
pub fn draw(f: &mut Frame, app: &App) -> BoardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let add_button = render_header(f, rows[0]);
    let columns = render_board(f, rows[1], app);
    render_footer(f, rows[2], app);

    if let Some(form) = app.form() {
        render_form(f, form);
    }

    BoardLayout {
        columns,
        add_button,
    }
}

fn render_header(f: &mut Frame, area: Rect) -> Rect {
    let header = Line::from(vec![
        Span::styled(
            ADD_BUTTON,
            Style::default().fg(Color::White).bg(Color::Blue),
        ),
        Span::styled(
            "  Task Manager",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
    Rect::new(area.x, area.y, (ADD_BUTTON.len() as u16).min(area.width), 1)
}

fn column_color(status: Status) -> Color {
    match status {
        Status::ToDo => Color::Blue,
        Status::InProgress => Color::Yellow,
        Status::Done => Color::Green,
    }
}

fn render_board(f: &mut Frame, area: Rect, app: &App) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let columns = group_by_status(app.store.tasks());
    let board = &app.board;
    let dragged = board.dragged();

    for (status, tasks) in columns.iter() {
        let i = status.index();
        let is_selected_column = board.selected_status == i;
        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(row, t)| {
                let mut name_style = Style::default().fg(Color::White);
                if dragged == Some(&t.id) {
                    name_style = name_style.add_modifier(Modifier::ITALIC | Modifier::DIM);
                } else if is_selected_column && board.selected_task == row {
                    name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                ListItem::new(vec![
                    Line::from(Span::styled(&t.name, name_style)),
                    Line::from(Span::styled(
                        format!("  Due: {}", t.due_date),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let border_style = if board.hovered() == Some(status) {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else if is_selected_column {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let list = List::new(items).block(
            Block::default()
                .title(Span::styled(
                    format!("{} ({})", status, tasks.len()),
                    Style::default()
                        .fg(column_color(status))
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        f.render_widget(list, chunks[i]);
    }

    [chunks[0], chunks[1], chunks[2]]
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(notice) = app.message() {
        let color = if notice.is_error() { Color::Red } else { Color::Green };
        Line::from(Span::styled(notice.text(), Style::default().fg(color)))
    } else if app.form().is_some() {
        Line::from("Tab: next field  ←/→: status  Enter: submit  Esc: cancel")
    } else if app.board.is_dragging() {
        Line::from("←/→: choose column  Space/Enter: drop  Esc: cancel")
    } else {
        Line::from("a: add  Enter: edit  Space: pick up  Shift+←/→: move  q: quit")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field_lines<'a>(form: &'a TaskForm, field: Field, value: &'a str) -> Vec<Line<'a>> {
    let focused = form.focus() == field;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused && field != Field::Status { "_" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(field.label(), label_style)),
        Line::from(format!(" {}{}", value, cursor)),
    ];
    match form.errors().get(field) {
        Some(error) => lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines
}

fn render_form(f: &mut Frame, form: &TaskForm) {
    let area = centered_rect(FORM_WIDTH, FORM_HEIGHT, f.area());
    let status = form
        .status
        .map(|s| format!("< {} >", s))
        .unwrap_or_else(|| "< select >".to_string());

    let mut lines = Vec::new();
    lines.extend(field_lines(form, Field::Name, &form.name));
    lines.extend(field_lines(form, Field::Status, &status));
    lines.extend(field_lines(form, Field::DueDate, &form.due_date));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" Enter: {} ", form.submit_label()),
            Style::default().fg(Color::White).bg(Color::Blue),
        ),
        Span::raw("  "),
        Span::styled(" Esc: Cancel ", Style::default().bg(Color::DarkGray)),
    ]));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> (String, BoardLayout) {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        let mut layout = BoardLayout::default();
        terminal.draw(|f| layout = draw(f, app)).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (text, layout)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn board_renders_three_columns_with_seed_tasks() {
        let app = App::default();
        let (text, layout) = render(&app);

        assert!(text.contains("To Do (2)"));
        assert!(text.contains("In Progress (2)"));
        assert!(text.contains("Done (2)"));
        assert!(text.contains("Task 6"));
        assert!(text.contains("Due: 2024-09-30"));
        assert!(text.contains("Task Manager"));

        assert_eq!(layout.add_button.width, ADD_BUTTON.len() as u16);
        assert_eq!(layout.columns[0].y, 1);
        assert!(layout.columns[0].right() <= layout.columns[1].x);
    }

    #[test]
    fn rendered_layout_hit_tests_tasks() {
        let app = App::default();
        let (_, layout) = render(&app);
        let columns = group_by_status(app.store.tasks());
        let area = layout.columns[1];
        let task = layout.task_at(&columns, area.x + 2, area.y + 1).unwrap();
        assert_eq!(task.name, "Task 3");
    }

    #[test]
    fn form_popup_shows_inline_errors() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        let (text, _) = render(&app);
        assert!(text.contains("Add New Task"));
        assert!(text.contains("Task name is required"));
        assert!(text.contains("Due date is required"));
        assert!(!text.contains("Status is required"));
    }

    #[test]
    fn edit_popup_uses_update_wording() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);

        let (text, _) = render(&app);
        assert!(text.contains("Update Task"));
        assert!(text.contains("< To Do >"));
    }

    #[test]
    fn footer_colors_notices_by_kind() {
        let mut app = App::default();
        app.apply(crate::store::Action::SetTaskStatus {
            id: crate::task::TaskId::from("nope"),
            status: Status::Done,
        });
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|f| {
            draw(f, &app);
        })
        .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 23)].symbol(), "T");
        assert_eq!(buffer[(0, 23)].fg, Color::Red);

        press(&mut app, KeyCode::Down);
        let (text, _) = render(&app);
        assert!(text.contains("a: add"));
        assert!(!text.contains("Task not found"));
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_rect(FORM_WIDTH, FORM_HEIGHT, area), area);
        assert_eq!(
            centered_rect(10, 2, Rect::new(0, 0, 20, 6)),
            Rect::new(5, 2, 10, 2)
        );
    }
}

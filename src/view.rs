use ratatui::{
    backend::Backend,
    layout::Rect,
    prelude::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::{
    app::{App, Focus},
    model::Task,
    store::TaskListStore,
};

const PLACEHOLDER: &str = "What needs to be done?";
const ADD_HINT: &str = "[Enter] Add";
const ACCENT: Color = Color::Red;

pub fn draw<B: Backend>(frame: &mut Frame<B>, app: &mut App) {
    let has_tasks = app.store.total_count() > 0;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(if has_tasks { 1 } else { 0 }),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(frame.size());

    frame.render_widget(Paragraph::new(header()), chunks[0]);
    frame.render_widget(
        Paragraph::new(status_line(&app.store)).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
    draw_input(frame, app, chunks[2]);

    if let Some(ratio) = app.store.progress_ratio() {
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(ACCENT).bg(Color::DarkGray))
                .ratio(ratio)
                .label(format!("{:.0}%", ratio * 100.0)),
            chunks[3],
        );
    }

    if has_tasks {
        draw_tasks(frame, app, chunks[4]);
        frame.render_widget(
            Paragraph::new(stats_line(&app.store))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            chunks[5],
        );
    } else {
        draw_empty(frame, chunks[4]);
    }

    frame.render_widget(
        Paragraph::new(help_line(app.focus)).style(Style::default().fg(Color::DarkGray)),
        chunks[6],
    );
}

fn header() -> Line<'static> {
    Line::from(vec![
        Span::styled("Todo", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(".", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    ])
}

pub fn status_line(store: &TaskListStore) -> String {
    match store.total_count() {
        0 => "No tasks yet. Add one below.".to_string(),
        total => format!("{} of {} tasks completed", store.completed_count(), total),
    }
}

pub fn stats_line(store: &TaskListStore) -> String {
    format!(
        "{} total  {} completed  {} remaining",
        store.total_count(),
        store.completed_count(),
        store.remaining_count()
    )
}

fn help_line(focus: Focus) -> &'static str {
    match focus {
        Focus::Input => "(enter) add  (tab) tasks  (esc) quit",
        Focus::List => "(space) toggle  (d) delete  (j/k) move  (tab) input  (q) quit",
    }
}

fn draw_input<B: Backend>(frame: &mut Frame<B>, app: &App, area: Rect) {
    let pending = app.store.pending_input();
    let add_style = match app.store.can_submit() {
        true => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        false => Style::default().fg(Color::DarkGray),
    };
    let border_style = match app.focus {
        Focus::Input => Style::default().fg(ACCENT),
        Focus::List => Style::default().fg(Color::DarkGray),
    };
    let content = match pending.is_empty() {
        true => Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        false => Span::raw(pending),
    };
    let (scroll, cursor) = input_scroll(pending, area.width.saturating_sub(2));

    frame.render_widget(
        Paragraph::new(Line::from(content))
            .scroll((0, scroll))
            .block(
                Block::default()
                    .title(Span::styled(ADD_HINT, add_style))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            ),
        area,
    );

    if app.focus == Focus::Input {
        frame.set_cursor(area.x + 1 + cursor, area.y + 1);
    }
}

/// Horizontal scroll and cursor column for the input line, both in display
/// cells. The tail of the text stays visible with one free cell for the cursor.
fn input_scroll(pending: &str, inner_width: u16) -> (u16, u16) {
    let text_width = u16::try_from(Span::raw(pending).width()).unwrap_or(u16::MAX);
    let visible = inner_width.saturating_sub(1);
    let scroll = text_width.saturating_sub(visible);
    (scroll, text_width - scroll)
}

fn task_item<'a>(task: &'a Task, date_format: &str) -> ListItem<'a> {
    let (mark, text_style) = match task.completed {
        true => (
            Span::styled("✓ ", Style::default().fg(ACCENT)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ),
        false => (Span::raw("○ "), Style::default().fg(Color::White)),
    };
    ListItem::new(Text::from(vec![
        Line::from(vec![mark, Span::styled(task.text.as_str(), text_style)]),
        Line::from(Span::styled(
            format!("    Added on {}", task.created_on(date_format)),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
}

fn draw_tasks<B: Backend>(frame: &mut Frame<B>, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .map(|task| task_item(task, &app.date_format))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">>");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_empty<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let text = vec![
        Line::from(Span::styled("✓", Style::default().fg(Color::DarkGray))),
        Line::from("All caught up!"),
        Line::from(Span::styled(
            "Add a task to get started.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn app() -> App {
        App::with_store(TaskListStore::with_clock(fixed_clock), "%Y-%m-%d")
    }

    fn add(app: &mut App, text: &str) {
        app.store.set_pending_input(text);
        app.store.add();
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let screen = render(&mut app());
        assert!(screen.contains("Todo."));
        assert!(screen.contains("No tasks yet. Add one below."));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("All caught up!"));
        assert!(screen.contains("Add a task to get started."));
        assert!(!screen.contains("remaining"));
    }

    #[test]
    fn tasks_render_in_order_with_dates() {
        let mut app = app();
        add(&mut app, "Buy milk");
        add(&mut app, "Walk dog");
        let first = app.store.tasks()[0].id;
        app.store.toggle(first);

        let screen = render(&mut app);
        let milk = screen.find("✓ Buy milk").unwrap();
        let dog = screen.find("○ Walk dog").unwrap();
        assert!(milk < dog);

        let date = app.store.tasks()[0].created_on("%Y-%m-%d");
        assert!(screen.contains(&format!("Added on {date}")));
        assert!(screen.contains("1 of 2 tasks completed"));
        assert!(screen.contains("2 total  1 completed  1 remaining"));
        assert!(!screen.contains("All caught up!"));
    }

    #[test]
    fn pending_input_replaces_placeholder() {
        let mut app = app();
        app.store.set_pending_input("draft");
        let screen = render(&mut app);
        assert!(screen.contains("draft"));
        assert!(!screen.contains(PLACEHOLDER));
    }

    #[test]
    fn status_and_stats_text() {
        let mut app = app();
        assert_eq!(status_line(&app.store), "No tasks yet. Add one below.");
        add(&mut app, "A");
        add(&mut app, "B");
        add(&mut app, "C");
        let id = app.store.tasks()[2].id;
        app.store.toggle(id);
        assert_eq!(status_line(&app.store), "1 of 3 tasks completed");
        assert_eq!(stats_line(&app.store), "3 total  1 completed  2 remaining");
    }

    #[test]
    fn help_follows_focus() {
        assert!(help_line(Focus::Input).contains("(enter) add"));
        assert!(help_line(Focus::List).contains("(d) delete"));
    }

    fn cell_at(app: &mut App, needle: &str) -> Option<ratatui::buffer::Cell> {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let needle: Vec<String> = needle.chars().map(String::from).collect();
        for row in buffer.content.chunks(width) {
            for start in 0..=width.saturating_sub(needle.len()) {
                let cells = &row[start..start + needle.len()];
                if cells.iter().zip(&needle).all(|(cell, ch)| &cell.symbol == ch) {
                    return Some(cells[0].clone());
                }
            }
        }
        None
    }

    #[test]
    fn add_hint_is_dimmed_until_input_is_submittable() {
        let mut app = app();
        let hint = cell_at(&mut app, ADD_HINT).unwrap();
        assert_eq!(hint.fg, Color::DarkGray);
        assert!(!hint.modifier.contains(Modifier::BOLD));

        app.store.set_pending_input("   ");
        let hint = cell_at(&mut app, ADD_HINT).unwrap();
        assert_eq!(hint.fg, Color::DarkGray);

        app.store.set_pending_input("Buy milk");
        let hint = cell_at(&mut app, ADD_HINT).unwrap();
        assert_eq!(hint.fg, ACCENT);
        assert!(hint.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn input_scroll_keeps_tail_and_cursor_visible() {
        assert_eq!(input_scroll("", 10), (0, 0));
        assert_eq!(input_scroll("abc", 10), (0, 3));
        assert_eq!(input_scroll("abcdefghij", 10), (1, 9));
        assert_eq!(input_scroll("abcdefghijklmnop", 10), (7, 9));
        // Wide characters count two cells each.
        assert_eq!(input_scroll("买牛奶", 10), (0, 6));
        assert_eq!(input_scroll("买牛奶买牛奶", 10), (3, 9));
    }

    #[test]
    fn long_input_shows_its_tail() {
        let mut app = app();
        let text = format!("{}END", "x".repeat(120));
        app.store.set_pending_input(text);
        let screen = render(&mut app);
        assert!(screen.contains("xxxEND"));
    }
}

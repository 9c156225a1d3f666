use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::gateway::Gateway;
use crate::models::{InputMode, TaskId};
use crate::sync::TaskList;

pub struct App {
    pub list: TaskList,
    pub list_state: ListState,
    pub mode: InputMode,
    pub should_quit: bool,
}

impl App {
    pub fn new(list: TaskList) -> Self {
        App {
            list,
            list_state: ListState::default(),
            mode: InputMode::Insert,
            should_quit: false,
        }
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.list_state
            .selected()
            .and_then(|i| self.list.tasks().get(i))
            .map(|task| task.id)
    }

    pub fn next_item(&mut self) {
        let len = self.list.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        let len = self.list.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    // Keep the highlight on a live row after the list shrinks.
    fn clamp_selection(&mut self) {
        let len = self.list.tasks().len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            InputMode::Insert => self.handle_insert_key(key).await,
            InputMode::Browse => self.handle_browse_key(key).await,
        }
    }

    async fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Browse;
                return;
            }
            KeyCode::Enter => {
                // Faults are logged by the task list; the draft stays put.
                let _ = self.list.on_add().await;
                return;
            }
            _ => {}
        }

        let draft = self.list.draft_mut();
        match key.code {
            KeyCode::Char(c) => draft.insert_char(c),
            KeyCode::Backspace => draft.delete_char(),
            KeyCode::Delete => draft.delete_forward(),
            KeyCode::Left => draft.move_cursor_left(),
            KeyCode::Right => draft.move_cursor_right(),
            KeyCode::Home => draft.move_to_start_of_line(),
            KeyCode::End => draft.move_to_end_of_line(),
            _ => {}
        }
    }

    async fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::Char('i') | KeyCode::Char('a') => self.mode = InputMode::Insert,
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    let _ = self.list.on_update(id).await;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    let _ = self.list.on_delete(id).await;
                    self.clamp_selection();
                }
            }
            KeyCode::Char('y') => {
                let text = self
                    .list_state
                    .selected()
                    .and_then(|i| self.list.tasks().get(i))
                    .map(|task| task.text.clone());
                if let Some(text) = text {
                    self.list.set_draft(&text);
                    self.mode = InputMode::Insert;
                }
            }
            _ => {}
        }
    }
}

pub async fn run_tui(gateway: Gateway) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TaskList::new(gateway));
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    // Placeholder until the first read completes.
    terminal.draw(|f| ui(f, app))?;
    app.list.load().await?;

    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key).await;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    if app.list.is_loading() {
        let loading = Paragraph::new("Loading tasks...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Length(1), Constraint::Min(0)])
            .split(f.area());
        f.render_widget(loading, rows[1]);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_input(f, app, chunks[0]);
    render_tasks(f, app, chunks[1]);
    render_help(f, app, chunks[2]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let border = match app.mode {
        InputMode::Insert => Style::default().fg(Color::Cyan),
        InputMode::Browse => Style::default().fg(Color::DarkGray),
    };
    let input = Paragraph::new(app.list.draft_text())
        .block(Block::default().borders(Borders::ALL).title("Your task").border_style(border))
        .style(Style::default().fg(Color::White));
    f.render_widget(input, area);

    if app.mode == InputMode::Insert {
        let x = cursor_column(area, app.list.draft().cursor());
        f.set_cursor_position((x, area.y + 1));
    }
}

// Column inside the bordered input for a char cursor; pinned to the last
// inner cell once the draft runs past the box.
fn cursor_column(area: Rect, cursor: usize) -> u16 {
    let last = (area.right() as usize).saturating_sub(2).max(area.x as usize + 1);
    (area.x as usize + 1).saturating_add(cursor).min(last) as u16
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect) {
    let tasks: Vec<ListItem> = app
        .list
        .tasks()
        .iter()
        .map(|task| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{} ", task.id), Style::default().fg(Color::Cyan)),
                Span::styled(task.text.clone(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let tasks_list = List::new(tasks)
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(tasks_list, area, &mut app.list_state);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        InputMode::Insert => "Enter: add • Esc: browse",
        InputMode::Browse => "↑/↓: select • e: apply text • d: delete • y: copy text • i: type • q: quit",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

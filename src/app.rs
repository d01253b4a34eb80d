//! Application state and input routing
//!
//! `App` owns the store, the board view model and the open form, and maps
//! crossterm events onto them. It never touches the terminal, so the whole
//! interaction can be driven from tests.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{debug, info};

use crate::form::{Field, FormRequest, Submission, TaskForm};
use crate::kanban_board::{group_by_status, BoardLayout, KanbanBoard};
use crate::store::{Action, TaskStore};
use crate::task::{Status, TaskId};

/// Footer message left by the last interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Where a mouse press started.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Press {
    task: TaskId,
    column: Status,
    left_column: bool,
}

#[derive(Debug)]
pub struct App {
    pub store: TaskStore,
    pub board: KanbanBoard,
    form: Option<TaskForm>,
    layout: BoardLayout,
    press: Option<Press>,
    message: Option<Notice>,
    should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            board: KanbanBoard::new(),
            form: None,
            layout: BoardLayout::default(),
            press: None,
            message: None,
            should_quit: false,
        }
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn message(&self) -> Option<&Notice> {
        self.message.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        // Notices last until the next key.
        self.message = None;
        if self.form.is_some() {
            self.handle_form_key(key);
        } else {
            self.handle_board_key(key);
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.open_form(self.board.add_new()),
            KeyCode::Enter if self.board.is_dragging() => {
                let column = self.board.selected_column();
                self.drop_on(column);
            }
            KeyCode::Enter => {
                if let Some(task) = self.board.selected(self.store.tasks()) {
                    let request = self.board.click(task);
                    self.open_form(request);
                }
            }
            KeyCode::Left | KeyCode::Right if shift && !self.board.is_dragging() => {
                let direction = if key.code == KeyCode::Left { -1 } else { 1 };
                if let Some(action) = self.board.move_selected(self.store.tasks(), direction) {
                    self.apply(action);
                }
            }
            KeyCode::Left => self.step_column(-1),
            KeyCode::Right => self.step_column(1),
            KeyCode::Up => self.board.select_task(-1, self.store.tasks()),
            KeyCode::Down => self.board.select_task(1, self.store.tasks()),
            KeyCode::Char(' ') => {
                if self.board.is_dragging() {
                    let column = self.board.selected_column();
                    self.drop_on(column);
                } else if let Some(task) = self.board.selected(self.store.tasks()) {
                    let id = task.id.clone();
                    self.board.drag_start(&id);
                    self.board.drag_over(task.status);
                }
            }
            KeyCode::Esc => self.board.cancel_drag(),
            _ => {}
        }
    }

    /// Column selection. While carrying a task the target column follows.
    fn step_column(&mut self, direction: isize) {
        if self.board.is_dragging() {
            self.board.selected_status = self.board.selected_column().shifted(direction).index();
            self.board.drag_over(self.board.selected_column());
        } else {
            self.board.select_column(direction, self.store.tasks());
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => return self.cancel_form(),
            KeyCode::Enter => return self.submit_form(),
            _ => {}
        }
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left if form.focus() == Field::Status => form.cycle_status(-1),
            KeyCode::Right if form.focus() == Field::Status => form.cycle_status(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.form.is_some() {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.layout.is_add_button(x, y) {
                    self.open_form(self.board.add_new());
                    return;
                }
                let columns = group_by_status(self.store.tasks());
                if let Some(task) = self.layout.task_at(&columns, x, y) {
                    self.press = Some(Press {
                        task: task.id.clone(),
                        column: task.status,
                        left_column: false,
                    });
                    let id = task.id.clone();
                    self.board.select(&id, self.store.tasks());
                    self.board.drag_start(&id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(column) = self.layout.column_at(x, y) {
                    self.board.drag_over(column);
                    if let Some(press) = self.press.as_mut() {
                        press.left_column |= column != press.column;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(press) = self.press.take() else {
                    self.board.cancel_drag();
                    return;
                };
                let columns = group_by_status(self.store.tasks());
                let released_on = self.layout.task_at(&columns, x, y).map(|t| t.id.clone());
                match self.layout.column_at(x, y) {
                    _ if !press.left_column && released_on.as_ref() == Some(&press.task) => {
                        self.board.cancel_drag();
                        if let Some(task) = self.store.get(&press.task) {
                            let request = self.board.click(task);
                            self.open_form(request);
                        }
                    }
                    Some(column) => self.drop_on(column),
                    None => self.board.cancel_drag(),
                }
            }
            _ => {}
        }
    }

    fn drop_on(&mut self, column: Status) {
        let dragged = self.board.dragged().cloned();
        if let Some(action) = self.board.drop_on(self.store.tasks(), column) {
            self.apply(action);
        }
        match dragged {
            Some(id) => self.board.select(&id, self.store.tasks()),
            None => self.board.clamp_selection(self.store.tasks()),
        }
    }

    pub fn open_form(&mut self, request: FormRequest) {
        debug!(?request, "opening form");
        self.board.cancel_drag();
        self.press = None;
        self.form = Some(TaskForm::open(request));
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form. Invalid input keeps it open with its errors.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let Ok(submission) = form.submit() else {
            return;
        };
        self.form = None;

        match submission {
            Submission::Create(fields) => match self.store.add_task(fields) {
                Ok(id) => {
                    info!(%id, "task added");
                    self.message = Some(Notice::Info("Task added".to_string()));
                    self.board.select(&id, self.store.tasks());
                }
                Err(err) => self.message = Some(Notice::Error(err.to_string())),
            },
            Submission::Update { id, fields } => {
                self.apply(Action::UpdateTask {
                    id: id.clone(),
                    fields,
                });
                self.board.select(&id, self.store.tasks());
            }
        }
    }

    pub fn apply(&mut self, action: Action) {
        let id = action.task_id().clone();
        match self.store.dispatch(action) {
            Ok(()) => {
                self.message = None;
                self.board.select(&id, self.store.tasks());
            }
            Err(err) => self.message = Some(Notice::Error(err.to_string())),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(TaskStore::seeded())
    }
}

//! Board view model
//!
//! Groups tasks into columns and turns gestures (drag, drop, click) into
//! store actions or form requests. Nothing here touches the store directly.

use ratatui::layout::{Position, Rect};
use serde::Serialize;

use crate::form::FormRequest;
use crate::store::Action;
use crate::task::{Status, Task, TaskId};

/// Rows each task occupies in a column: name, then due date.
pub const ITEM_HEIGHT: u16 = 2;

/// Tasks partitioned by status, in sequence order within each column.
#[derive(Debug, Default)]
pub struct Columns<'a> {
    buckets: [Vec<&'a Task>; 3],
}

impl<'a> Columns<'a> {
    pub fn get(&self, status: Status) -> &[&'a Task] {
        &self.buckets[status.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Status, &[&'a Task])> + '_ {
        Status::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn snapshot(&self) -> Vec<ColumnSnapshot<'a>> {
        self.iter()
            .map(|(status, tasks)| ColumnSnapshot {
                status,
                tasks: tasks.to_vec(),
            })
            .collect()
    }
}

/// Serializable view of one column, used by the JSON dump.
#[derive(Debug, Serialize)]
pub struct ColumnSnapshot<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

pub fn group_by_status(tasks: &[Task]) -> Columns<'_> {
    let mut columns = Columns::default();
    for task in tasks {
        columns.buckets[task.status.index()].push(task);
    }
    columns
}

/// What dropping `dragged` on the `target` column should do.
///
/// Only a task actually being dragged onto a different column produces a
/// status change.
pub fn drop_intent(dragged: Option<&Task>, target: Status) -> Option<Action> {
    match dragged {
        Some(task) if task.status != target => Some(Action::SetTaskStatus {
            id: task.id.clone(),
            status: target,
        }),
        _ => None,
    }
}

/// Screen areas of the last rendered frame, for mouse hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: [Rect; 3],
    pub add_button: Rect,
}

impl BoardLayout {
    pub fn column_at(&self, x: u16, y: u16) -> Option<Status> {
        let position = Position::new(x, y);
        self.columns
            .iter()
            .position(|area| area.contains(position))
            .and_then(Status::from_index)
    }

    pub fn is_add_button(&self, x: u16, y: u16) -> bool {
        self.add_button.contains(Position::new(x, y))
    }

    /// Task under the cursor. Columns are drawn with a one-cell border.
    pub fn task_at<'a>(&self, columns: &Columns<'a>, x: u16, y: u16) -> Option<&'a Task> {
        let status = self.column_at(x, y)?;
        let area = self.columns[status.index()];
        let top = area.y + 1;
        if y < top || y >= area.bottom().saturating_sub(1) {
            return None;
        }
        let row = ((y - top) / ITEM_HEIGHT) as usize;
        columns.get(status).get(row).copied()
    }
}

#[derive(Debug, Default)]
pub struct KanbanBoard {
    pub selected_status: usize,
    pub selected_task: usize,
    dragged: Option<TaskId>,
    hovered: Option<Status>,
}

impl KanbanBoard {
    pub fn new() -> Self {
        Self {
            selected_status: 0,
            selected_task: 0,
            dragged: None,
            hovered: None,
        }
    }

    pub fn get_tasks_by_status<'a>(&self, tasks: &'a [Task], status: Status) -> Vec<&'a Task> {
        tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn selected_column(&self) -> Status {
        Status::from_index(self.selected_status).unwrap_or(Status::ToDo)
    }

    pub fn selected<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.get_tasks_by_status(tasks, self.selected_column())
            .get(self.selected_task)
            .copied()
    }

    pub fn select_column(&mut self, direction: isize, tasks: &[Task]) {
        self.selected_status = self.selected_column().shifted(direction).index();
        self.clamp_selection(tasks);
    }

    pub fn select_task(&mut self, direction: isize, tasks: &[Task]) {
        let max_tasks = self
            .get_tasks_by_status(tasks, self.selected_column())
            .len();
        if max_tasks == 0 {
            self.selected_task = 0;
            return;
        }
        self.selected_task =
            (self.selected_task as isize + direction).clamp(0, max_tasks as isize - 1) as usize;
    }

    /// Point the selection at `id`, wherever it now lives.
    pub fn select(&mut self, id: &TaskId, tasks: &[Task]) {
        for status in Status::ALL {
            if let Some(row) = self
                .get_tasks_by_status(tasks, status)
                .iter()
                .position(|t| &t.id == id)
            {
                self.selected_status = status.index();
                self.selected_task = row;
                return;
            }
        }
    }

    pub fn clamp_selection(&mut self, tasks: &[Task]) {
        let len = self
            .get_tasks_by_status(tasks, self.selected_column())
            .len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    pub fn drag_start(&mut self, id: &TaskId) {
        self.dragged = Some(id.clone());
        self.hovered = None;
    }

    pub fn dragged(&self) -> Option<&TaskId> {
        self.dragged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Every column accepts drops.
    pub fn drag_over(&mut self, column: Status) -> bool {
        if self.dragged.is_some() {
            self.hovered = Some(column);
        }
        true
    }

    pub fn hovered(&self) -> Option<Status> {
        self.hovered
    }

    /// Finish a drag on `column`. The dragged reference is always cleared.
    pub fn drop_on(&mut self, tasks: &[Task], column: Status) -> Option<Action> {
        let dragged = self
            .dragged
            .take()
            .and_then(|id| tasks.iter().find(|t| t.id == id));
        self.hovered = None;
        drop_intent(dragged, column)
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }

    /// Nudge the selected task one column left or right.
    pub fn move_selected(&self, tasks: &[Task], direction: isize) -> Option<Action> {
        let task = self.selected(tasks)?;
        drop_intent(Some(task), task.status.shifted(direction))
    }

    pub fn click(&self, task: &Task) -> FormRequest {
        FormRequest::Edit(task.clone())
    }

    pub fn add_new(&self) -> FormRequest {
        FormRequest::Create
    }
}

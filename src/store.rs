//! Task store
//!
//! The store owns the ordered task sequence. Every change goes through a
//! named [`Action`] applied by [`reduce`], a pure function from the current
//! state to the next one.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::task::{Status, Task, TaskFields, TaskId};

/// Snapshot of the task sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    tasks: Vec<Task>,
}

impl TaskState {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.iter().any(|t| t.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn find_mut(&mut self, id: &TaskId) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))
    }
}

/// The sample board every session starts from.
pub fn seed_tasks() -> Vec<Task> {
    [
        ("1", "Task 1", "2024-09-30", Status::ToDo),
        ("2", "Task 2", "2024-10-01", Status::ToDo),
        ("3", "Task 3", "2024-10-02", Status::InProgress),
        ("4", "Task 4", "2024-10-03", Status::InProgress),
        ("5", "Task 5", "2024-10-04", Status::Done),
        ("6", "Task 6", "2024-10-05", Status::Done),
    ]
    .into_iter()
    .map(|(id, name, due_date, status)| {
        Task::new(TaskId::from(id), TaskFields::new(name, due_date, status))
    })
    .collect()
}

/// Named state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a task. The id is minted when the action is created.
    AddTask { id: TaskId, fields: TaskFields },
    /// Move a task to another column.
    SetTaskStatus { id: TaskId, status: Status },
    /// Replace name, due date and status of a task.
    UpdateTask { id: TaskId, fields: TaskFields },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddTask { .. } => "tasks/addTask",
            Action::SetTaskStatus { .. } => "tasks/setTaskStatus",
            Action::UpdateTask { .. } => "tasks/updateTask",
        }
    }

    pub fn task_id(&self) -> &TaskId {
        match self {
            Action::AddTask { id, .. }
            | Action::SetTaskStatus { id, .. }
            | Action::UpdateTask { id, .. } => id,
        }
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// The input is never mutated. Ids are never changed, and entries are never
/// removed or duplicated: adds append, the other two replace in place.
/// A transition naming an unknown id, or adding an id already present, is
/// rejected with a [`StoreError`].
pub fn reduce(state: &TaskState, action: &Action) -> Result<TaskState, StoreError> {
    let mut next = state.clone();
    match action {
        Action::AddTask { id, fields } => {
            if next.contains(id.as_str()) {
                return Err(StoreError::DuplicateId(id.clone()));
            }
            next.tasks.push(Task::new(id.clone(), fields.clone()));
        }
        Action::SetTaskStatus { id, status } => {
            next.find_mut(id)?.status = *status;
        }
        Action::UpdateTask { id, fields } => {
            next.find_mut(id)?.apply(fields.clone());
        }
    }
    Ok(next)
}

/// Timestamp-based id that no task in `state` uses yet.
///
/// Two adds within the same millisecond get a numeric suffix.
pub fn fresh_id(state: &TaskState, now: DateTime<Utc>) -> TaskId {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut candidate = stamp.clone();
    let mut suffix = 1;
    while state.contains(&candidate) {
        candidate = format!("{}-{}", stamp, suffix);
        suffix += 1;
    }
    TaskId::new(candidate)
}

/// Owned state container. One per session; tests build their own.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    state: TaskState,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            state: TaskState::new(tasks),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_tasks())
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.state.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Run an action through [`reduce`]. On error the state is kept as is.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        match reduce(&self.state, &action) {
            Ok(next) => {
                debug!(action = action.name(), id = %action.task_id(), tasks = next.len(), "applied");
                self.state = next;
                Ok(())
            }
            Err(err) => {
                warn!(action = action.name(), error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    pub fn add_task(&mut self, fields: TaskFields) -> Result<TaskId, StoreError> {
        let id = fresh_id(&self.state, Utc::now());
        self.dispatch(Action::AddTask {
            id: id.clone(),
            fields,
        })?;
        Ok(id)
    }

    pub fn set_task_status(&mut self, id: &TaskId, status: Status) -> Result<(), StoreError> {
        self.dispatch(Action::SetTaskStatus {
            id: id.clone(),
            status,
        })
    }

    pub fn update_task(&mut self, id: &TaskId, fields: TaskFields) -> Result<(), StoreError> {
        self.dispatch(Action::UpdateTask {
            id: id.clone(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn id(s: &str) -> TaskId {
        TaskId::from(s)
    }

    #[test]
    fn seeded_store_matches_sample_board() {
        let store = TaskStore::seeded();
        let rows: Vec<_> = store
            .tasks()
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str(), t.due_date.as_str(), t.status))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("1", "Task 1", "2024-09-30", Status::ToDo),
                ("2", "Task 2", "2024-10-01", Status::ToDo),
                ("3", "Task 3", "2024-10-02", Status::InProgress),
                ("4", "Task 4", "2024-10-03", Status::InProgress),
                ("5", "Task 5", "2024-10-04", Status::Done),
                ("6", "Task 6", "2024-10-05", Status::Done),
            ]
        );
    }

    #[test]
    fn add_task_appends_with_fresh_id() {
        let mut store = TaskStore::seeded();
        let new_id = store
            .add_task(TaskFields::new("Task 7", "2024-11-01", Status::ToDo))
            .unwrap();

        assert_eq!(store.len(), 7);
        let last = store.tasks().last().unwrap();
        assert_eq!(last.id, new_id);
        assert_eq!(last.fields(), TaskFields::new("Task 7", "2024-11-01", Status::ToDo));
        assert!(store.tasks()[..6].iter().all(|t| t.id != new_id));
    }

    #[test]
    fn set_task_status_changes_only_that_status() {
        let mut store = TaskStore::seeded();
        let before = store.tasks().to_vec();

        store.set_task_status(&id("1"), Status::Done).unwrap();

        let after = store.tasks();
        assert_eq!(after[0].status, Status::Done);
        assert_eq!(after[0].name, before[0].name);
        assert_eq!(after[0].due_date, before[0].due_date);
        assert_eq!(&after[1..], &before[1..]);
    }

    #[test]
    fn unknown_id_is_rejected_and_state_kept() {
        let mut store = TaskStore::seeded();
        let before = store.state().clone();

        let err = store.set_task_status(&id("99"), Status::Done).unwrap_err();
        assert_eq!(err, StoreError::TaskNotFound(id("99")));

        let err = store
            .update_task(&id("99"), TaskFields::new("x", "2024-01-01", Status::ToDo))
            .unwrap_err();
        assert_eq!(err, StoreError::TaskNotFound(id("99")));

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn update_task_replaces_fields_in_place() {
        let mut store = TaskStore::seeded();
        store
            .update_task(&id("3"), TaskFields::new("Task 3b", "2024-10-02", Status::InProgress))
            .unwrap();

        let task = &store.tasks()[2];
        assert_eq!(task.id, id("3"));
        assert_eq!(task.name, "Task 3b");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = TaskStore::seeded();
        let err = store
            .dispatch(Action::AddTask {
                id: id("2"),
                fields: TaskFields::new("dup", "2024-01-01", Status::Done),
            })
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(id("2")));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let state = TaskState::new(seed_tasks());
        let snapshot = state.clone();
        let next = reduce(
            &state,
            &Action::SetTaskStatus {
                id: id("2"),
                status: Status::Done,
            },
        )
        .unwrap();
        assert_eq!(state, snapshot);
        assert_ne!(next, snapshot);
    }

    #[test]
    fn fresh_id_is_timestamp_with_collision_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 9, 30, 12).unwrap();
        let first = fresh_id(&TaskState::default(), now);
        assert_eq!(first.as_str(), "2024-11-01T09:30:12.000Z");

        let taken = TaskState::new(vec![Task::new(
            first.clone(),
            TaskFields::new("a", "2024-11-01", Status::ToDo),
        )]);
        assert_eq!(fresh_id(&taken, now).as_str(), "2024-11-01T09:30:12.000Z-1");
    }

    #[test]
    fn action_names_follow_slice_convention() {
        let action = Action::SetTaskStatus {
            id: id("1"),
            status: Status::Done,
        };
        assert_eq!(action.name(), "tasks/setTaskStatus");
        assert_eq!(action.task_id(), &id("1"));
    }
}

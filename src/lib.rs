//! taskboard - a three-column kanban board for the terminal
//!
//! Tasks live in an in-memory [`TaskStore`] seeded with sample data and are
//! changed only through named [`Action`]s.

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod kanban_board;
pub mod logging;
pub mod store;
pub mod task;
pub mod terminal;
pub mod ui;


pub use app::{App, Notice};
pub use error::{BoardError, Result, StoreError};
pub use form::{FormMode, FormRequest, Submission, TaskForm};
pub use kanban_board::{drop_intent, group_by_status, KanbanBoard};
pub use store::{reduce, Action, TaskState, TaskStore};
pub use task::{Status, Task, TaskFields, TaskId};

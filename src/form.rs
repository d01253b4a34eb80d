//! Create/edit task form
//!
//! The form is opened either for a new task or for an existing one; that
//! choice is fixed at open time and decides which [`Submission`] comes out.

use chrono::NaiveDate;

use crate::task::{Status, Task, TaskFields, TaskId};

pub const NAME_REQUIRED: &str = "Task name is required";
pub const STATUS_REQUIRED: &str = "Status is required";
pub const DUE_DATE_REQUIRED: &str = "Due date is required";
pub const DUE_DATE_INVALID: &str = "Due date must be a valid date (YYYY-MM-DD)";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How the board asks for the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    Create,
    Edit(Task),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: TaskId },
}

/// A validated form, ready to become a store action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(TaskFields),
    Update { id: TaskId, fields: TaskFields },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Status,
    DueDate,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Status, Field::DueDate];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Task Name",
            Field::Status => "Status",
            Field::DueDate => "Due Date",
        }
    }

    fn offset(self, direction: isize) -> Field {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ALL[(index + direction).rem_euclid(Self::ALL.len() as isize) as usize]
    }
}

/// Inline messages, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub status: Option<&'static str>,
    pub due_date: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.due_date.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Status => self.status,
            Field::DueDate => self.due_date,
        }
    }

    fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Status => self.status = None,
            Field::DueDate => self.due_date = None,
        }
    }
}

pub fn validate_due_date(value: &str) -> Result<NaiveDate, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DUE_DATE_REQUIRED);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DUE_DATE_INVALID)
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    pub name: String,
    pub status: Option<Status>,
    pub due_date: String,
    focus: Field,
    errors: FieldErrors,
}

impl TaskForm {
    pub fn open(request: FormRequest) -> Self {
        match request {
            FormRequest::Create => Self::create(),
            FormRequest::Edit(task) => Self::edit(&task),
        }
    }

    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            status: Some(Status::ToDo),
            due_date: String::new(),
            focus: Field::Name,
            errors: FieldErrors::default(),
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit {
                id: task.id.clone(),
            },
            name: task.name.clone(),
            status: Some(task.status),
            due_date: task.due_date.clone(),
            focus: Field::Name,
            errors: FieldErrors::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Task",
            FormMode::Edit { .. } => "Update Task",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Task",
            FormMode::Edit { .. } => "Update Task",
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.offset(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.offset(-1);
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Field::Name => self.name.push(c),
            Field::DueDate => self.due_date.push(c),
            Field::Status => {
                if c == ' ' {
                    self.cycle_status(1);
                }
                return;
            }
        }
        self.errors.clear(self.focus);
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Name => {
                self.name.pop();
            }
            Field::DueDate => {
                self.due_date.pop();
            }
            Field::Status => return,
        }
        self.errors.clear(self.focus);
    }

    pub fn cycle_status(&mut self, direction: isize) {
        self.status = Some(self.status.unwrap_or(Status::ToDo).cycled(direction));
        self.errors.clear(Field::Status);
    }

    /// Check every field independently.
    pub fn validate(&self) -> Result<TaskFields, FieldErrors> {
        let name = self.name.trim();
        let errors = FieldErrors {
            name: name.is_empty().then_some(NAME_REQUIRED),
            status: self.status.is_none().then_some(STATUS_REQUIRED),
            due_date: validate_due_date(&self.due_date).err(),
        };

        match self.status {
            Some(status) if errors.is_empty() => Ok(TaskFields::new(
                name,
                self.due_date.trim(),
                status,
            )),
            _ => Err(errors),
        }
    }

    /// Validate and produce the submission. Success clears the fields;
    /// failure keeps them and records the inline errors.
    pub fn submit(&mut self) -> Result<Submission, FieldErrors> {
        match self.validate() {
            Ok(fields) => {
                let submission = match &self.mode {
                    FormMode::Create => Submission::Create(fields),
                    FormMode::Edit { id } => Submission::Update {
                        id: id.clone(),
                        fields,
                    },
                };
                self.reset();
                Ok(submission)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.due_date.clear();
        self.status = Some(Status::ToDo);
        self.focus = Field::Name;
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_tasks;

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn create_form_submits_create_and_clears() {
        let mut form = TaskForm::open(FormRequest::Create);
        assert_eq!(form.title(), "Add New Task");
        type_str(&mut form, "Task 7");
        form.focus_next();
        form.focus_next();
        type_str(&mut form, "2024-11-01");

        let submission = form.submit().unwrap();
        assert_eq!(
            submission,
            Submission::Create(TaskFields::new("Task 7", "2024-11-01", Status::ToDo))
        );
        assert!(form.name.is_empty());
        assert!(form.due_date.is_empty());
        assert_eq!(form.focus(), Field::Name);
    }

    #[test]
    fn edit_form_is_prefilled_and_keeps_the_id() {
        let tasks = seed_tasks();
        let mut form = TaskForm::open(FormRequest::Edit(tasks[2].clone()));
        assert_eq!(form.title(), "Update Task");
        assert_eq!(form.name, "Task 3");
        assert_eq!(form.status, Some(Status::InProgress));
        assert_eq!(form.due_date, "2024-10-02");

        form.input_char('b');
        assert_eq!(
            form.submit().unwrap(),
            Submission::Update {
                id: TaskId::from("3"),
                fields: TaskFields::new("Task 3b", "2024-10-02", Status::InProgress),
            }
        );
    }

    #[test]
    fn empty_name_is_rejected_with_message() {
        let mut form = TaskForm::create();
        form.due_date = "2024-11-01".to_string();

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.name, Some(NAME_REQUIRED));
        assert_eq!(errors.due_date, None);
        assert_eq!(form.errors().get(Field::Name), Some("Task name is required"));
        assert_eq!(form.due_date, "2024-11-01");
    }

    #[test]
    fn every_missing_field_reports_independently() {
        let mut form = TaskForm::create();
        form.name = "   ".to_string();
        form.status = None;

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.name, Some(NAME_REQUIRED));
        assert_eq!(errors.status, Some(STATUS_REQUIRED));
        assert_eq!(errors.due_date, Some(DUE_DATE_REQUIRED));
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        assert_eq!(validate_due_date("2024-02-30"), Err(DUE_DATE_INVALID));
        assert_eq!(validate_due_date("next week"), Err(DUE_DATE_INVALID));
        assert_eq!(validate_due_date(""), Err(DUE_DATE_REQUIRED));
        assert!(validate_due_date("2024-02-29").is_ok());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = TaskForm::create();
        form.submit().unwrap_err();
        assert!(form.errors().name.is_some());

        form.input_char('x');
        assert!(form.errors().name.is_none());
        assert!(form.errors().due_date.is_some());
    }

    #[test]
    fn focus_and_status_cycle() {
        let mut form = TaskForm::create();
        form.focus_prev();
        assert_eq!(form.focus(), Field::DueDate);
        form.focus_prev();
        assert_eq!(form.focus(), Field::Status);

        form.input_char(' ');
        assert_eq!(form.status, Some(Status::InProgress));
        form.input_char('z');
        assert_eq!(form.status, Some(Status::InProgress));
        form.cycle_status(-1);
        form.cycle_status(-1);
        assert_eq!(form.status, Some(Status::Done));
        assert!(form.name.is_empty());
    }
}

use crate::domain::task::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting tasks in a column view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Status,
    Priority,
    Created,
    Updated,
    Start,
    Deadline,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "priority" => Ok(SortField::Priority),
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "start" => Ok(SortField::Start),
            "deadline" => Ok(SortField::Deadline),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: id, title, status, priority, created, updated, start, deadline",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts tasks in place by `field` and `order`.
///
/// Works on owned tasks or on the borrowed tasks of a column view. The sort
/// is stable, so ties keep their column order. Tasks without the sorted
/// date always come last, whichever the direction.
///
/// # Examples
/// ```
/// use tasklane_core::domain::sorting::{sort_tasks, SortField, SortOrder};
/// use tasklane_core::{BoardState, NewTask};
///
/// let (board, _) = BoardState::default().create_task(NewTask::new("b")).unwrap();
/// let (board, _) = board.create_task(NewTask::new("a")).unwrap();
///
/// let mut tasks: Vec<_> = board.tasks().collect();
/// sort_tasks(&mut tasks, SortField::Title, SortOrder::Ascending);
/// assert_eq!(tasks[0].title, "a");
/// ```
pub fn sort_tasks<T: Borrow<Task>>(tasks: &mut [T], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        let cmp = match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
            SortField::Priority => priority_rank(a.priority).cmp(&priority_rank(b.priority)),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Updated => a.updated_at.cmp(&b.updated_at),
            SortField::Start => return compare_option_dates(a.start_date, b.start_date, order),
            SortField::Deadline => return compare_option_dates(a.deadline, b.deadline, order),
        };
        apply_order(cmp, order)
    });
}

fn apply_order(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => cmp,
        SortOrder::Descending => cmp.reverse(),
    }
}

/// Workflow progression: To Do → In Progress → Done
fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::ToDo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Done => 2,
    }
}

fn priority_rank(priority: TaskPriority) -> u8 {
    match priority {
        TaskPriority::Low => 0,
        TaskPriority::Medium => 1,
        TaskPriority::High => 2,
    }
}

/// Compares optional dates in `order`, with `None` always sorting to the end
fn compare_option_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => apply_order(a_date.cmp(&b_date), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

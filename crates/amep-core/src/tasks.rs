//! Task list with XP rewards.
//!
//! Students earn XP when they complete a task; each completion queues a
//! short-lived award marker at the point where the task was ticked off.

use crate::session::Role;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long an XP award marker stays visible.
pub const XP_AWARD_LIFETIME: Duration = Duration::from_millis(1200);

/// XP granted for each teacher task.
pub const TEACHER_TASK_XP: u32 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    LessonPlan,
    Grading,
    Administrative,
    Meeting,
    Homework,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

impl TaskStatus {
    fn toggled(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub kind: TaskKind,
    pub priority: Priority,
    pub status: TaskStatus,
    pub xp: u32,
}

impl Task {
    pub fn new(id: &str, title: &str, kind: TaskKind, priority: Priority, status: TaskStatus, xp: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            priority,
            status,
            xp,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// High-priority work that is still open gets flagged as urgent.
    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::High && !self.is_done()
    }
}

/// A floating "+XP" marker.
#[derive(Debug, Clone, PartialEq)]
pub struct XpAward {
    pub id: Uuid,
    pub xp: u32,
    /// Where the task was ticked off, in screen coordinates.
    pub position: Point,
    pub created_at: Instant,
}

impl XpAward {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= XP_AWARD_LIFETIME
    }
}

/// Task list for one role.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    role: Role,
    tasks: Vec<Task>,
    awards: Vec<XpAward>,
}

impl TaskBoard {
    /// The starting task list for `role`.
    pub fn for_role(role: Role) -> Self {
        let tasks = match role {
            Role::Student => vec![
                Task::new("s-1", "Calculus Mastery Quiz", TaskKind::Homework, Priority::High, TaskStatus::Todo, 150),
                Task::new("s-2", "Renewable Site Analysis", TaskKind::Homework, Priority::Medium, TaskStatus::Todo, 200),
                Task::new("s-3", "Physics: Wave Mechanics", TaskKind::Homework, Priority::Low, TaskStatus::Done, 50),
            ],
            Role::Teacher => vec![
                Task::new("t-1", "Grade Mid-term PBL Reports", TaskKind::Grading, Priority::High, TaskStatus::Todo, TEACHER_TASK_XP),
                Task::new("t-2", "Prepare Thermodynamics Lesson", TaskKind::LessonPlan, Priority::Medium, TaskStatus::Todo, TEACHER_TASK_XP),
            ],
        };
        Self::with_tasks(role, tasks)
    }

    pub fn with_tasks(role: Role, tasks: Vec<Task>) -> Self {
        Self {
            role,
            tasks,
            awards: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Open tasks, in list order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_done())
    }

    /// Total XP of completed tasks.
    pub fn earned_xp(&self) -> u32 {
        self.tasks.iter().filter(|t| t.is_done()).map(|t| t.xp).sum()
    }

    /// Award markers still on screen.
    pub fn awards(&self) -> &[XpAward] {
        &self.awards
    }

    /// Flip a task between todo and done.
    pub fn toggle(&mut self, id: &str, at: Point) -> Option<XpAward> {
        self.toggle_at(id, at, Instant::now())
    }

    /// Flip a task, using `now` as the award timestamp.
    ///
    /// Returns the award queued when a student completes an open task.
    pub fn toggle_at(&mut self, id: &str, at: Point, now: Instant) -> Option<XpAward> {
        let is_student = self.role.is_student();
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;

        let award = (is_student && task.status == TaskStatus::Todo).then(|| XpAward {
            id: Uuid::new_v4(),
            xp: task.xp,
            position: at,
            created_at: now,
        });
        task.status = task.status.toggled();

        if let Some(award) = &award {
            log::debug!("Task {} completed, awarding {} XP", task.id, award.xp);
            self.awards.push(award.clone());
        }
        award
    }

    /// Drop award markers that have finished animating.
    pub fn expire_awards(&mut self, now: Instant) {
        self.awards.retain(|a| !a.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_tasks() {
        let board = TaskBoard::for_role(Role::Student);
        assert_eq!(board.tasks().len(), 3);
        assert_eq!(board.earned_xp(), 50);
        assert_eq!(board.pending().count(), 2);
        assert!(board.task("s-1").unwrap().is_urgent());
    }

    #[test]
    fn test_teacher_tasks() {
        let board = TaskBoard::for_role(Role::Teacher);
        assert_eq!(board.tasks().len(), 2);
        assert!(board.tasks().iter().all(|t| t.xp == TEACHER_TASK_XP));
        assert_eq!(board.task("t-2").unwrap().kind, TaskKind::LessonPlan);
    }

    #[test]
    fn test_student_completion_awards_xp() {
        let mut board = TaskBoard::for_role(Role::Student);
        let award = board.toggle("s-2", Point::new(40.0, 80.0)).unwrap();

        assert_eq!(award.xp, 200);
        assert_eq!(award.position, Point::new(40.0, 80.0));
        assert!(board.task("s-2").unwrap().is_done());
        assert_eq!(board.earned_xp(), 250);
        assert_eq!(board.awards().len(), 1);
    }

    #[test]
    fn test_reopening_gives_no_award() {
        let mut board = TaskBoard::for_role(Role::Student);
        assert!(board.toggle("s-3", Point::ZERO).is_none());
        assert_eq!(board.task("s-3").unwrap().status, TaskStatus::Todo);
        assert_eq!(board.earned_xp(), 0);
    }

    #[test]
    fn test_teacher_completion_has_no_award() {
        let mut board = TaskBoard::for_role(Role::Teacher);
        assert!(board.toggle("t-1", Point::ZERO).is_none());
        assert!(board.task("t-1").unwrap().is_done());
        assert!(board.awards().is_empty());
    }

    #[test]
    fn test_unknown_task_is_ignored() {
        let mut board = TaskBoard::for_role(Role::Student);
        assert!(board.toggle("nope", Point::ZERO).is_none());
        assert_eq!(board.earned_xp(), 50);
    }

    #[test]
    fn test_awards_expire() {
        let mut board = TaskBoard::for_role(Role::Student);
        let start = Instant::now();
        board.toggle_at("s-1", Point::ZERO, start);
        board.toggle_at("s-2", Point::ZERO, start + Duration::from_millis(800));

        board.expire_awards(start + Duration::from_millis(1000));
        assert_eq!(board.awards().len(), 2);

        board.expire_awards(start + Duration::from_millis(1300));
        assert_eq!(board.awards().len(), 1);
        assert_eq!(board.awards()[0].xp, 200);

        board.expire_awards(start + Duration::from_millis(2000));
        assert!(board.awards().is_empty());
    }
}

//! Unit tests for report export.

mod service_tests;

use crate::task::domain::{
    NewTask, Schedule, Task, TaskCommand, TaskEdit, TaskStatus, TaskView,
};
use crate::user::domain::{
    Area, Email, User, UserChanges, UserId, UserProfile, UserRole, UserStatus,
};
use mockable::DefaultClock;

pub(super) fn user(name: &str, role: UserRole, organization: &str, status: UserStatus) -> User {
    let profile = UserProfile {
        name: name.to_owned(),
        email: Email::new(format!("{}@example.com", name.to_ascii_lowercase()))
            .expect("valid email"),
        role,
        document_type: None,
        document_number: None,
        organization: organization.to_owned(),
        area: Some(Area::Technology),
    };
    let mut account = User::register(profile, "hash".to_owned(), &DefaultClock)
        .expect("valid profile");
    account
        .apply(UserChanges {
            status: Some(status),
            ..UserChanges::default()
        })
        .expect("status change is always valid");
    account
}

pub(super) fn task_view(status: TaskStatus, schedule: Schedule) -> TaskView {
    let new_task = NewTask {
        title: "Audit".to_owned(),
        description: None,
        area: Area::Accounting,
        assignee: UserId::new(),
        schedule,
    };
    let mut task = Task::create(new_task, UserId::new(), &DefaultClock).expect("valid task");
    task.apply(
        TaskCommand::Leader(TaskEdit {
            status: Some(status),
            ..TaskEdit::default()
        }),
        &DefaultClock,
    )
    .expect("leader edits never fail");
    TaskView {
        task,
        assignee: None,
        creator: None,
    }
}

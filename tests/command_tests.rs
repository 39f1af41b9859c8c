mod common;

use common::{date, project, user};
use projectust::commands::*;
use projectust::models::{Priority, Project, ProjectDraft, Role, Status, UserDraft};

#[test]
fn test_add_applies_every_field() {
    let users = vec![user(3, "Ana", true)];
    let changes = ProjectChanges {
        description: Some("Plan for Q3".into()),
        status: Some(Status::InProgress),
        priority: Some(Priority::High),
        start: Some("2025-07-01".into()),
        end: Some("2025-12-31".into()),
        due: Some("2025-09-30".into()),
        budget: Some("12000".into()),
        assignee: Some("3".into()),
    };
    let mut draft = ProjectDraft::new("Q3 Budget");
    apply_project_changes(&mut draft, &changes, &users).unwrap();

    assert_eq!(draft.description.as_deref(), Some("Plan for Q3"));
    assert_eq!(draft.status, Status::InProgress);
    assert_eq!(draft.priority, Priority::High);
    assert_eq!(draft.start_date, Some(date(2025, 7, 1)));
    assert_eq!(draft.end_date, Some(date(2025, 12, 31)));
    assert_eq!(draft.due_date, Some(date(2025, 9, 30)));
    assert_eq!(draft.budget, Some(12000.0));
    assert_eq!(draft.assigned_to_id, Some(3));
}

#[test]
fn test_edit_clears_fields_with_none() {
    let existing = Project {
        description: Some("old".into()),
        due_date: Some(date(2024, 1, 1)),
        budget: Some(10.0),
        assigned_to_id: Some(3),
        ..project(1, "Edit me")
    };
    let mut draft = ProjectDraft::from(&existing);
    let changes = ProjectChanges {
        description: Some("none".into()),
        due: Some("none".into()),
        budget: Some("".into()),
        assignee: Some("none".into()),
        ..Default::default()
    };
    apply_project_changes(&mut draft, &changes, &[]).unwrap();
    assert_eq!(draft.description, None);
    assert_eq!(draft.due_date, None);
    assert_eq!(draft.budget, None);
    assert_eq!(draft.assigned_to_id, None);
    assert_eq!(draft.title, "Edit me");
}

#[test]
fn test_untouched_fields_are_kept() {
    let existing = Project { assigned_to_id: Some(8), priority: Priority::Low, ..project(1, "Keep") };
    let mut draft = ProjectDraft::from(&existing);
    let changes = ProjectChanges { status: Some(Status::Completed), ..Default::default() };
    // The inactive/unknown assignee is not re-checked when it is not being changed
    apply_project_changes(&mut draft, &changes, &[]).unwrap();
    assert_eq!(draft.assigned_to_id, Some(8));
    assert_eq!(draft.priority, Priority::Low);
    assert_eq!(draft.status, Status::Completed);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let mut draft = ProjectDraft::new("X");
    let bad_date = ProjectChanges { due: Some("tomorrow".into()), ..Default::default() };
    assert!(apply_project_changes(&mut draft, &bad_date, &[]).is_err());

    let bad_budget = ProjectChanges { budget: Some("-5".into()), ..Default::default() };
    assert!(apply_project_changes(&mut draft, &bad_budget, &[]).is_err());

    let mut blank = ProjectDraft::new("   ");
    assert!(apply_project_changes(&mut blank, &ProjectChanges::default(), &[]).is_err());
}

#[test]
fn test_only_active_users_can_be_assigned() {
    let users = vec![user(1, "Ana", true), user(2, "Bo", false)];
    assert_eq!(resolve_assignee_input("1", &users).unwrap(), Some(1));
    assert_eq!(resolve_assignee_input("", &users).unwrap(), None);

    let inactive = resolve_assignee_input("2", &users).unwrap_err();
    assert!(inactive.to_string().contains("inactive"));
    let missing = resolve_assignee_input("5", &users).unwrap_err();
    assert!(missing.to_string().contains("not found"));
    assert!(resolve_assignee_input("ana", &users).is_err());
}

#[test]
fn test_user_changes() {
    let base = UserDraft { name: "Ana".into(), email: "ana@example.com".into(), role: Role::User, is_active: true };

    let changes = UserChanges {
        email: Some(" ANA@New.org ".into()),
        role: Some(Role::Admin),
        deactivate: true,
        ..Default::default()
    };
    let updated = apply_user_changes(base.clone(), &changes).unwrap();
    assert_eq!(updated.email, "ana@new.org");
    assert_eq!(updated.role, Role::Admin);
    assert!(!updated.is_active);

    let invalid = UserChanges { email: Some("nope".into()), ..Default::default() };
    assert!(apply_user_changes(base, &invalid).is_err());
}

mod common;

use common::{project, user};
use projectust::error::CriteriaError;
use projectust::filter::{filter_projects, result_summary, AssigneeFilter, FilterCriteria};
use projectust::models::{Priority, Project, Status};

fn sample() -> Vec<Project> {
    vec![
        Project { description: Some("Quarterly numbers".into()), assigned_to_id: Some(5), ..project(1, "Budget review") },
        Project { status: Status::InProgress, priority: Priority::High, ..project(2, "Website redesign") },
        Project { status: Status::Completed, priority: Priority::Low, assigned_to_id: Some(5), ..project(3, "Office move") },
        Project { status: Status::Cancelled, description: Some("Old BUDGET draft".into()), ..project(4, "Archive") },
        Project { status: Status::Draft, priority: Priority::High, assigned_to_id: Some(9), ..project(5, "Hiring") },
    ]
}

fn ids(projects: &[&Project]) -> Vec<u64> {
    projects.iter().map(|p| p.id).collect()
}

#[test]
fn test_empty_criteria_is_identity() {
    let projects = sample();
    let result = filter_projects(&projects, &FilterCriteria::default());
    assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_search_matches_title_and_description_case_insensitively() {
    let projects = sample();
    let criteria = FilterCriteria { search_text: "budget".into(), ..Default::default() };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![1, 4]);

    let criteria = FilterCriteria { search_text: "QUARTERLY".into(), ..Default::default() };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![1]);
}

#[test]
fn test_search_without_match_returns_empty() {
    let projects = sample();
    let criteria = FilterCriteria { search_text: "Budget Plan".into(), ..Default::default() };
    assert!(filter_projects(&projects, &criteria).is_empty());
}

#[test]
fn test_missing_description_never_matches_search() {
    let projects = vec![project(1, "Alpha")];
    let criteria = FilterCriteria { search_text: "beta".into(), ..Default::default() };
    assert!(filter_projects(&projects, &criteria).is_empty());
}

#[test]
fn test_status_set_keeps_original_order() {
    let projects = sample();
    let criteria = FilterCriteria {
        statuses: [Status::Completed, Status::Draft].into_iter().collect(),
        ..Default::default()
    };
    let result = filter_projects(&projects, &criteria);
    assert_eq!(ids(&result), vec![1, 3, 5]);
    assert!(result.iter().all(|p| matches!(p.status, Status::Draft | Status::Completed)));
}

#[test]
fn test_priority_set() {
    let projects = sample();
    let criteria = FilterCriteria {
        priorities: [Priority::High].into_iter().collect(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![2, 5]);
}

#[test]
fn test_unassigned_filter() {
    let projects = vec![project(1, "Loose"), Project { assigned_to_id: Some(5), ..project(2, "Owned") }];
    let criteria = FilterCriteria { assignee: AssigneeFilter::Unassigned, ..Default::default() };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![1]);
}

#[test]
fn test_user_filter_matches_only_that_assignee() {
    let projects = sample();
    let criteria = FilterCriteria { assignee: AssigneeFilter::User(5), ..Default::default() };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![1, 3]);

    let criteria = FilterCriteria { assignee: AssigneeFilter::User(42), ..Default::default() };
    assert!(filter_projects(&projects, &criteria).is_empty());
}

#[test]
fn test_all_criteria_combine() {
    let projects = sample();
    let criteria = FilterCriteria {
        search_text: "e".into(),
        statuses: [Status::Draft, Status::Completed].into_iter().collect(),
        priorities: [Priority::Low, Priority::Medium].into_iter().collect(),
        assignee: AssigneeFilter::User(5),
    };
    assert_eq!(ids(&filter_projects(&projects, &criteria)), vec![1, 3]);
}

#[test]
fn test_filter_is_idempotent_and_a_subsequence() {
    let projects = sample();
    let criteria = FilterCriteria {
        statuses: [Status::Draft, Status::Cancelled].into_iter().collect(),
        ..Default::default()
    };
    let once: Vec<Project> = filter_projects(&projects, &criteria).into_iter().cloned().collect();
    let twice: Vec<Project> = filter_projects(&once, &criteria).into_iter().cloned().collect();
    assert_eq!(once, twice);

    let positions: Vec<usize> = once
        .iter()
        .map(|p| projects.iter().position(|q| q == p).expect("result must come from input"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_assignee_filter_parsing() {
    assert_eq!("".parse::<AssigneeFilter>(), Ok(AssigneeFilter::Any));
    assert_eq!("unassigned".parse::<AssigneeFilter>(), Ok(AssigneeFilter::Unassigned));
    assert_eq!("12".parse::<AssigneeFilter>(), Ok(AssigneeFilter::User(12)));
    assert_eq!(
        "bob".parse::<AssigneeFilter>(),
        Err(CriteriaError::InvalidAssignee("bob".into()))
    );
    assert!("-3".parse::<AssigneeFilter>().is_err());
    assert_eq!("0".parse::<AssigneeFilter>(), Ok(AssigneeFilter::User(0)));
}

#[test]
fn test_assignee_filter_rejects_coercible_input() {
    for raw in ["+5", " 7 ", "7 ", "UNASSIGNED", "Unassigned", " unassigned", "005", " ", "99999999999999999999999"] {
        assert_eq!(
            raw.parse::<AssigneeFilter>(),
            Err(CriteriaError::InvalidAssignee(raw.to_string())),
            "input {:?}",
            raw
        );
    }
}

#[test]
fn test_status_and_priority_parsing_reject_unknown_values() {
    assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
    assert_eq!("in-progress".parse::<Status>(), Ok(Status::InProgress));
    assert!(matches!("archived".parse::<Status>(), Err(CriteriaError::UnknownStatus(_))));
    assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
    assert!(matches!("urgent".parse::<Priority>(), Err(CriteriaError::UnknownPriority(_))));
}

#[test]
fn test_toggle_clear_and_active_labels() {
    let users = vec![user(5, "Ana", true)];
    let mut criteria = FilterCriteria::default();
    assert!(!criteria.has_active_filters());

    criteria.toggle_status(Status::Draft);
    criteria.toggle_priority(Priority::High);
    criteria.search_text = "plan".into();
    criteria.assignee = AssigneeFilter::User(5);
    assert!(criteria.has_active_filters());
    assert_eq!(
        criteria.active_labels(&users),
        vec!["Search: \"plan\"", "Status: Draft", "Priority: High", "Assignee: Ana"]
    );

    criteria.toggle_status(Status::Draft);
    assert!(criteria.statuses.is_empty());

    criteria.assignee = AssigneeFilter::User(77);
    assert_eq!(criteria.active_labels(&users).last().unwrap(), "Assignee: #77");

    criteria.clear();
    assert_eq!(criteria, FilterCriteria::default());
    assert!(criteria.active_labels(&users).is_empty());
}

#[test]
fn test_result_summary() {
    assert_eq!(result_summary(2, 5), "Showing 2 of 5 projects");
}

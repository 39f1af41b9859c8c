mod common;

use common::{date, project, user};
use projectust::error::ValidationError;
use projectust::models::{Project, ProjectDraft, Role, UserDraft};
use projectust::validation::*;

#[test]
fn test_email_format() {
    assert!(is_valid_email("ana@example.com"));
    assert!(is_valid_email("a.b+c@sub.example.org"));
    assert!(!is_valid_email("ana@example"));
    assert!(!is_valid_email("ana example@x.com"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("ana@@example.com"));
}

#[test]
fn test_user_draft_checks() {
    let mut draft = UserDraft { name: "Ana".into(), email: "ana@example.com".into(), role: Role::User, is_active: true };
    assert!(validate_user_draft(&draft).is_ok());

    draft.name = "   ".into();
    assert_eq!(validate_user_draft(&draft), Err(ValidationError::NameRequired));

    draft.name = "Ana".into();
    draft.email = "".into();
    assert_eq!(validate_user_draft(&draft), Err(ValidationError::EmailRequired));

    draft.email = "not-an-email".into();
    assert_eq!(validate_user_draft(&draft), Err(ValidationError::InvalidEmail("not-an-email".into())));
}

#[test]
fn test_project_draft_checks() {
    let draft = ProjectDraft::new("  ");
    assert_eq!(validate_project_draft(&draft), Err(ValidationError::TitleRequired));

    let draft = ProjectDraft { budget: Some(-1.0), ..ProjectDraft::new("Ok") };
    assert_eq!(validate_project_draft(&draft), Err(ValidationError::NegativeBudget(-1.0)));

    let draft = ProjectDraft { budget: Some(0.0), ..ProjectDraft::new("Ok") };
    assert!(validate_project_draft(&draft).is_ok());
}

#[test]
fn test_ingested_records_report_their_id() {
    let bad = Project { budget: Some(-50.0), ..project(12, "Overspent") };
    match validate_project(&bad) {
        Err(ValidationError::Project { id, source }) => {
            assert_eq!(id, 12);
            assert_eq!(*source, ValidationError::NegativeBudget(-50.0));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let mut u = user(3, "Ana", true);
    u.email = "broken".into();
    assert!(matches!(validate_user(&u), Err(ValidationError::User { id: 3, .. })));
    assert!(validate_user(&user(4, "Bo", false)).is_ok());
}

#[test]
fn test_date_input() {
    assert_eq!(parse_date_input("2025-09-30"), Ok(Some(date(2025, 9, 30))));
    assert_eq!(parse_date_input(""), Ok(None));
    assert_eq!(parse_date_input("None"), Ok(None));
    assert_eq!(parse_date_input("30/09/2025"), Err(ValidationError::InvalidDate("30/09/2025".into())));
}

#[test]
fn test_budget_input() {
    assert_eq!(parse_budget_input("1500.75"), Ok(Some(1500.75)));
    assert_eq!(parse_budget_input("none"), Ok(None));
    assert_eq!(parse_budget_input("-3"), Err(ValidationError::NegativeBudget(-3.0)));
    assert_eq!(parse_budget_input("lots"), Err(ValidationError::InvalidBudget("lots".into())));
    assert!(parse_budget_input("NaN").is_err());
}

#[test]
fn test_role_parsing() {
    assert_eq!("Manager".parse::<Role>(), Ok(Role::Manager));
    assert_eq!("owner".parse::<Role>(), Err(ValidationError::UnknownRole("owner".into())));
}

#[test]
fn test_clear_markers() {
    for raw in ["", "   ", "none", "None", " NONE "] {
        assert!(is_clear_marker(raw), "input {:?}", raw);
    }
    assert!(!is_clear_marker("nothing"));
    assert!(!is_clear_marker("0"));
}

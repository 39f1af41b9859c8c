use chrono::NaiveDateTime;
use crate::models::{Project, User};

/// Formats an optional date as `01 Mar 2024`, or `N/A` when unset.
pub fn format_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(d) => d.format("%d %b %Y").to_string(),
        None => "N/A".to_string(),
    }
}

/// Formats an amount with thousands separators, e.g. `$12,345.50`.
///
/// Whole amounts are shown without decimals.
pub fn format_budget(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match cents % 100 {
        0 => format!("{}${}", sign, grouped),
        frac => format!("{}${}.{:02}", sign, grouped, frac),
    }
}

/// Name of the assignee, `Unassigned`, or `Unassigned (#id)` for a dangling reference.
pub fn assignee_label(project: &Project, users: &[User]) -> String {
    match (project.assigned_to_id, project.assignee(users)) {
        (_, Some(user)) => user.name.clone(),
        (Some(id), None) => format!("Unassigned (#{})", id),
        (None, None) => "Unassigned".to_string(),
    }
}

/// User name with an `(Inactive)` marker.
pub fn user_label(user: &User) -> String {
    if user.is_active {
        user.name.clone()
    } else {
        format!("{} (Inactive)", user.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_budget_with_separators() {
        assert_eq!(format_budget(0.0), "$0");
        assert_eq!(format_budget(500.0), "$500");
        assert_eq!(format_budget(1234567.5), "$1,234,567.50");
        assert_eq!(format_budget(100000.0), "$100,000");
        assert_eq!(format_budget(-1500.25), "-$1,500.25");
    }

    #[test]
    fn formats_missing_date_as_na() {
        assert_eq!(format_date(None), "N/A");
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(format_date(Some(d)), "01 Mar 2024");
    }
}

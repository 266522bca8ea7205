//! Project listing filters.
//!
//! Search text, status and deadline window compose conjunctively. The
//! reference date is passed in so results do not depend on the clock.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};

use crate::constants::YEAR_WINDOW_DAYS;
use crate::error::{DomainError, DomainResult};
use crate::project::{Project, ProjectStatus};

/// Deadline range relative to "today".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeadlineWindow {
    #[default]
    None,
    /// [Monday of the current ISO week, +7 days)
    ThisWeek,
    /// [first of the current month, first of next month)
    ThisMonth,
    /// deadline <= today + 365 days, no lower bound
    WithinOneYear,
}

impl DeadlineWindow {
    /// Whether a project deadline falls inside this window. Projects
    /// without a deadline only pass [`DeadlineWindow::None`].
    pub fn contains(&self, deadline: Option<NaiveDate>, today: NaiveDate) -> bool {
        let deadline = match (self, deadline) {
            (DeadlineWindow::None, _) => return true,
            (_, None) => return false,
            (_, Some(deadline)) => deadline,
        };

        match self {
            DeadlineWindow::None => true,
            DeadlineWindow::ThisWeek => {
                let start = week_start(today);
                start <= deadline && deadline < start + Duration::days(7)
            }
            DeadlineWindow::ThisMonth => month_bounds(today)
                .map(|(start, end)| start <= deadline && deadline < end)
                .unwrap_or(false),
            DeadlineWindow::WithinOneYear => deadline <= today + Duration::days(YEAR_WINDOW_DAYS),
        }
    }
}

impl FromStr for DeadlineWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(DeadlineWindow::None),
            "this_week" => Ok(DeadlineWindow::ThisWeek),
            "this_month" => Ok(DeadlineWindow::ThisMonth),
            "within_1_year" => Ok(DeadlineWindow::WithinOneYear),
            other => Err(DomainError::validation(format!(
                "Invalid deadline window '{}'. Must be one of: none, this_week, this_month, within_1_year",
                other
            ))),
        }
    }
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

fn month_bounds(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
    let end = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
    };
    Some((start, end))
}

/// Filter criteria for the project listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Case-insensitive substring of the project name; empty matches all
    pub search: String,
    pub status: Option<ProjectStatus>,
    pub deadline: DeadlineWindow,
}

impl ProjectFilter {
    /// Build a filter from raw query values. Empty values mean "no filter";
    /// unknown status or window literals are rejected.
    pub fn parse(
        search: Option<&str>,
        status: Option<&str>,
        deadline: Option<&str>,
    ) -> DomainResult<Self> {
        let status = match status.map(str::trim) {
            None | Some("") => None,
            Some(literal) => Some(literal.parse()?),
        };
        let deadline = deadline.map(str::trim).unwrap_or_default().parse()?;

        Ok(Self {
            search: search.unwrap_or_default().trim().to_string(),
            status,
            deadline,
        })
    }

    pub fn matches(&self, project: &Project, today: NaiveDate) -> bool {
        let name_matches = self.search.is_empty()
            || project
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let status_matches = self.status.map_or(true, |status| project.status == status);

        name_matches && status_matches && self.deadline.contains(project.deadline, today)
    }
}

/// Keep the projects matching `filter`. Output order is unspecified.
pub fn filter_projects(
    projects: impl IntoIterator<Item = Project>,
    filter: &ProjectFilter,
    today: NaiveDate,
) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|project| filter.matches(project, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(name: &str, status: ProjectStatus, deadline: Option<NaiveDate>) -> Project {
        Project::new(
            ProjectDraft {
                name: name.to_string(),
                description: None,
                deadline,
                status,
            },
            None,
        )
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        let mut names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn sample() -> Vec<Project> {
        vec![
            project("Alpha Launch", ProjectStatus::Active, Some(date(2024, 5, 15))),
            project("Beta Rollout", ProjectStatus::Completed, Some(date(2024, 6, 3))),
            project("Gamma Research", ProjectStatus::OnHold, None),
            project("alphabet soup", ProjectStatus::Completed, Some(date(2026, 1, 1))),
        ]
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2024, 5, 15)
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let result = filter_projects(sample(), &ProjectFilter::default(), today());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = ProjectFilter::parse(Some("ALPHA"), None, None).unwrap();
        let result = filter_projects(sample(), &filter, today());
        assert_eq!(names(&result), vec!["Alpha Launch", "alphabet soup"]);

        let filter = ProjectFilter::parse(Some("launch"), Some(""), Some("")).unwrap();
        let result = filter_projects(sample(), &filter, today());
        assert_eq!(names(&result), vec!["Alpha Launch"]);
    }

    #[test]
    fn test_status_filter_returns_exact_subset() {
        let filter = ProjectFilter::parse(Some(""), Some("Completed"), None).unwrap();
        let result = filter_projects(sample(), &filter, today());
        assert!(result.iter().all(|p| p.status == ProjectStatus::Completed));
        assert_eq!(names(&result), vec!["Beta Rollout", "alphabet soup"]);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(ProjectFilter::parse(None, Some("Archived"), None).is_err());
        assert!(ProjectFilter::parse(None, None, Some("next_decade")).is_err());
    }

    #[test]
    fn test_this_week_is_monday_to_sunday() {
        let w = DeadlineWindow::ThisWeek;
        // 2024-05-13 is a Monday
        assert!(w.contains(Some(date(2024, 5, 13)), today()));
        assert!(w.contains(Some(date(2024, 5, 19)), today()));
        assert!(!w.contains(Some(date(2024, 5, 12)), today()));
        assert!(!w.contains(Some(date(2024, 5, 20)), today()));
        assert!(!w.contains(None, today()));
    }

    #[test]
    fn test_this_month_bounds() {
        let w = DeadlineWindow::ThisMonth;
        assert!(w.contains(Some(date(2024, 5, 1)), today()));
        assert!(w.contains(Some(date(2024, 5, 31)), today()));
        assert!(!w.contains(Some(date(2024, 6, 1)), today()));
        assert!(!w.contains(Some(date(2024, 4, 30)), today()));

        let december = date(2024, 12, 10);
        assert!(w.contains(Some(date(2024, 12, 31)), december));
        assert!(!w.contains(Some(date(2025, 1, 1)), december));
    }

    #[test]
    fn test_within_one_year_has_no_lower_bound() {
        let w = DeadlineWindow::WithinOneYear;
        assert!(w.contains(Some(date(2020, 1, 1)), today()));
        assert!(w.contains(Some(today() + Duration::days(365)), today()));
        assert!(!w.contains(Some(today() + Duration::days(366)), today()));
    }

    #[test]
    fn test_filters_compose() {
        let filter = ProjectFilter::parse(Some("a"), Some("Completed"), Some("within_1_year")).unwrap();
        let result = filter_projects(sample(), &filter, today());
        assert_eq!(names(&result), vec!["Beta Rollout"]);
    }

    #[test]
    fn test_window_excludes_projects_without_deadline() {
        let filter = ProjectFilter::parse(Some("gamma"), None, Some("within_1_year")).unwrap();
        assert!(filter_projects(sample(), &filter, today()).is_empty());
    }
}

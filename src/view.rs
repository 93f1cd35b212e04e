//! Pure derivation of the displayed view from the roster snapshot.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Employee, JobTitle};

/// Sort orderings selectable from the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    HireDateDesc,
    HireDateAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::HireDateDesc => "hire-date-desc",
            SortKey::HireDateAsc => "hire-date-asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "hire-date-desc" => Ok(SortKey::HireDateDesc),
            "hire-date-asc" => Ok(SortKey::HireDateAsc),
            other => Err(format!("Unknown sort key: {other}")),
        }
    }
}

/// The active ordering-or-filtering selection over the roster.
///
/// Sorting and job-title filtering are mutually exclusive selection modes, so
/// they are one union rather than two independent fields; the invalid
/// sort-plus-filter combination cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSpec {
    /// Default view: ascending by id.
    #[default]
    Unsorted,
    /// Sorted by the given key, full roster retained.
    Sort(SortKey),
    /// Filtered to one job title, snapshot order retained.
    JobTitle(JobTitle),
}

impl fmt::Display for ViewSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSpec::Unsorted => f.write_str("none"),
            ViewSpec::Sort(key) => write!(f, "{key}"),
            ViewSpec::JobTitle(title) => write!(f, "job-title: {title}"),
        }
    }
}

/// Case-insensitive name ordering with the raw name as tie-break, the closest
/// analog of the locale-aware comparison the service's web client uses.
fn name_order(a: &Employee, b: &Employee) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Derive the ordered sequence the table displays.
///
/// Sorting never drops records; the job-title filter keeps matching records in
/// the order they hold in the snapshot, with no secondary sort.
pub fn derive_view(roster: &[Employee], spec: ViewSpec) -> Vec<Employee> {
    match spec {
        ViewSpec::JobTitle(title) => roster
            .iter()
            .filter(|e| e.job_title == title)
            .cloned()
            .collect(),
        ViewSpec::Unsorted => {
            let mut view = roster.to_vec();
            view.sort_by_key(|e| e.id);
            view
        }
        ViewSpec::Sort(key) => {
            let mut view = roster.to_vec();
            match key {
                SortKey::NameAsc => view.sort_by(name_order),
                SortKey::NameDesc => view.sort_by(|a, b| name_order(b, a)),
                SortKey::HireDateDesc => view.sort_by(|a, b| b.hire_date.cmp(&a.hire_date)),
                SortKey::HireDateAsc => view.sort_by(|a, b| a.hire_date.cmp(&b.hire_date)),
            }
            view
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn emp(id: i64, name: &str, title: JobTitle, hired: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            job_title: title,
            hire_date: NaiveDate::parse_from_str(hired, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample_roster() -> Vec<Employee> {
        vec![
            emp(3, "carol", JobTitle::SoftwareEngineer, "2019-03-15"),
            emp(1, "Bob", JobTitle::SoftwareEngineer, "2020-01-01"),
            emp(2, "Amy", JobTitle::CustomerSupport, "2021-06-01"),
            emp(4, "Dan", JobTitle::ItSupportSpecialist, "2018-11-30"),
        ]
    }

    #[test]
    fn test_sorting_never_drops_records() {
        let roster = sample_roster();
        for spec in [
            ViewSpec::Unsorted,
            ViewSpec::Sort(SortKey::NameAsc),
            ViewSpec::Sort(SortKey::NameDesc),
            ViewSpec::Sort(SortKey::HireDateDesc),
            ViewSpec::Sort(SortKey::HireDateAsc),
        ] {
            assert_eq!(derive_view(&roster, spec).len(), roster.len());
        }
    }

    #[test]
    fn test_default_view_orders_by_id() {
        let view = derive_view(&sample_roster(), ViewSpec::Unsorted);
        let ids: Vec<i64> = view.iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn test_name_asc_is_case_insensitive() {
        let view = derive_view(&sample_roster(), ViewSpec::Sort(SortKey::NameAsc));
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Bob", "carol", "Dan"]);
    }

    #[test]
    fn test_name_desc_reverses_name_asc() {
        let roster = sample_roster();
        let asc = derive_view(&roster, ViewSpec::Sort(SortKey::NameAsc));
        let mut desc = derive_view(&roster, ViewSpec::Sort(SortKey::NameDesc));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_hire_date_desc_most_recent_first() {
        let view = derive_view(&sample_roster(), ViewSpec::Sort(SortKey::HireDateDesc));
        let ids: Vec<i64> = view.iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 1, 3, 4]);
    }

    #[test]
    fn test_hire_date_asc_oldest_first() {
        let view = derive_view(&sample_roster(), ViewSpec::Sort(SortKey::HireDateAsc));
        let ids: Vec<i64> = view.iter().map(|e| e.id).collect();
        assert_eq!(ids, [4, 3, 1, 2]);
    }

    #[test]
    fn test_job_title_filter_exact_and_complete() {
        let roster = sample_roster();
        let view = derive_view(&roster, ViewSpec::JobTitle(JobTitle::SoftwareEngineer));

        assert!(view.iter().all(|e| e.job_title == JobTitle::SoftwareEngineer));
        let expected: Vec<i64> = roster
            .iter()
            .filter(|e| e.job_title == JobTitle::SoftwareEngineer)
            .map(|e| e.id)
            .collect();
        let got: Vec<i64> = view.iter().map(|e| e.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_job_title_filter_keeps_snapshot_order() {
        // Snapshot holds id 3 before id 1; the filter must not reorder them.
        let view = derive_view(&sample_roster(), ViewSpec::JobTitle(JobTitle::SoftwareEngineer));
        let ids: Vec<i64> = view.iter().map(|e| e.id).collect();
        assert_eq!(ids, [3, 1]);
    }

    #[test]
    fn test_name_asc_scenario() {
        let roster = vec![
            emp(1, "Bob", JobTitle::SoftwareEngineer, "2020-01-01"),
            emp(2, "Amy", JobTitle::CustomerSupport, "2021-06-01"),
        ];
        let view = derive_view(&roster, ViewSpec::Sort(SortKey::NameAsc));
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Bob"]);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("name-asc".parse::<SortKey>().unwrap(), SortKey::NameAsc);
        assert_eq!("hire-date-desc".parse::<SortKey>().unwrap(), SortKey::HireDateDesc);
        assert!("salary".parse::<SortKey>().is_err());
    }
}

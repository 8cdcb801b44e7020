//! Print-order sort and eligibility predicates
//!
//! The sort order is a correctness property of a batch, not cosmetic: it
//! determines physical print order on a single printer with no downstream
//! reordering.

use chrono::NaiveDate;

use super::model::Task;

/// Rank a priority label for sorting; lower sorts first
///
/// high(0) < medium(1) < low(2) < optional(3) < anything else(4)
pub fn priority_rank(priority: &str) -> u8 {
    match priority.trim().to_lowercase().as_str() {
        "high" => 0,
        "medium" => 1,
        "low" => 2,
        "optional" => 3,
        _ => 4,
    }
}

/// Sort tasks into print order (ascending composite key)
///
/// 1. due date, present before absent, earliest first
/// 2. priority rank
/// 3. planned start, present before absent, earliest first
/// 4. title, case-insensitive
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by_key(sort_key);
}

fn sort_key(t: &Task) -> (bool, NaiveDate, u8, bool, NaiveDate, String) {
    (
        t.due_date.is_none(),
        t.due_date.unwrap_or(NaiveDate::MAX),
        priority_rank(&t.priority),
        t.planned_start.is_none(),
        t.planned_start.unwrap_or(NaiveDate::MAX),
        t.title.to_lowercase(),
    )
}

/// Print batch eligibility: not done, not yet printed, and either no
/// planned start or a planned start no later than today
pub fn is_print_eligible(t: &Task, today: NaiveDate) -> bool {
    !t.done && !t.printed && t.planned_start.is_none_or(|d| d <= today)
}

/// Summary batch eligibility: same as print, but ignores the printed flag
pub fn is_summary_eligible(t: &Task, today: NaiveDate) -> bool {
    !t.done && t.planned_start.is_none_or(|d| d <= today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, due: Option<&str>, priority: &str, start: Option<&str>) -> Task {
        let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        Task {
            id: title.to_string(),
            project: "".to_string(),
            priority: priority.to_string(),
            title: title.to_string(),
            planned_start: start.map(parse),
            due_date: due.map(parse),
            description: "".to_string(),
            printed: false,
            done: false,
        }
    }

    #[test]
    fn test_priority_rank() {
        assert_eq!(priority_rank("High"), 0);
        assert_eq!(priority_rank("medium"), 1);
        assert_eq!(priority_rank("LOW"), 2);
        assert_eq!(priority_rank("Optional"), 3);
        assert_eq!(priority_rank("Urgent-ish"), 4);
        assert_eq!(priority_rank(""), 4);
    }

    #[test]
    fn test_absent_due_date_sorts_last() {
        let mut tasks = vec![
            task("b", Some("2024-07-05"), "low", None),
            task("a", None, "high", None),
            task("c", Some("2024-07-01"), "medium", None),
        ];
        sort_tasks(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        // Absent due date loses to any present one, regardless of priority
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_priority_breaks_due_date_ties() {
        let mut tasks = vec![
            task("low", Some("2024-07-05"), "low", None),
            task("high", Some("2024-07-05"), "high", None),
            task("odd", Some("2024-07-05"), "someday", None),
            task("medium", Some("2024-07-05"), "medium", None),
        ];
        sort_tasks(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, vec!["high", "medium", "low", "odd"]);
    }

    #[test]
    fn test_planned_start_then_title_tie_breaks() {
        let mut tasks = vec![
            task("Zebra", None, "high", None),
            task("apple", None, "high", None),
            task("later", None, "high", Some("2024-07-02")),
            task("sooner", None, "high", Some("2024-07-01")),
        ];
        sort_tasks(&mut tasks);

        let order: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        // Present planned starts come first (ascending), then title, case-insensitive
        assert_eq!(order, vec!["sooner", "later", "apple", "Zebra"]);
    }

    #[test]
    fn test_print_eligibility() {
        let today = NaiveDate::parse_from_str("2024-07-03", "%Y-%m-%d").unwrap();

        let ready = task("ready", None, "high", Some("2024-07-01"));
        assert!(is_print_eligible(&ready, today));

        let unplanned = task("unplanned", None, "high", None);
        assert!(is_print_eligible(&unplanned, today));

        let future = task("future", None, "high", Some("2024-07-10"));
        assert!(!is_print_eligible(&future, today));

        let mut printed = task("printed", None, "high", None);
        printed.printed = true;
        assert!(!is_print_eligible(&printed, today));
        // The summary batch ignores the printed flag
        assert!(is_summary_eligible(&printed, today));

        let mut done = task("done", None, "high", None);
        done.done = true;
        assert!(!is_print_eligible(&done, today));
        assert!(!is_summary_eligible(&done, today));
    }
}

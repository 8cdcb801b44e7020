//! Workspace-database record parsing
//!
//! Page records come back as loosely structured JSON; these helpers pull the
//! typed task fields out of the property bag and normalize absent values
//! (missing dates become `None`, missing text becomes the empty string).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde_json::Value;

use super::model::Task;

/// Parse one page record into a [`Task`], resolving the project relation
/// through the given id → name map
pub fn parse_task_page(page: &Value, projects: &HashMap<String, String>) -> Task {
    let props = &page["properties"];

    let project = first_relation_id(&props["Project"])
        .and_then(|id| projects.get(&id).cloned())
        .unwrap_or_default();

    Task {
        id: page["id"].as_str().unwrap_or_default().to_string(),
        project,
        priority: props["Priority"]["select"]["name"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        title: plain_text(&props["Name"]["title"]),
        planned_start: date_start(&props["Planned start"]),
        due_date: date_start(&props["Due date"]),
        description: plain_text(&props["Description"]["rich_text"]),
        printed: props["Printed"]["checkbox"].as_bool().unwrap_or(false),
        done: props["Done"]["status"]["name"].as_str() == Some("Done"),
    }
}

/// Collect every project id referenced by the given page records
pub fn referenced_project_ids(pages: &[Value]) -> HashSet<String> {
    pages
        .iter()
        .filter_map(|page| first_relation_id(&page["properties"]["Project"]))
        .collect()
}

/// First relation id of a relation property, if any
fn first_relation_id(property: &Value) -> Option<String> {
    property["relation"]
        .as_array()?
        .first()?
        .get("id")?
        .as_str()
        .map(|s| s.to_string())
}

/// First plain_text fragment of a title/rich_text array
fn plain_text(fragments: &Value) -> String {
    fragments
        .as_array()
        .and_then(|a| a.first())
        .and_then(|f| f["plain_text"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// Start of a date property, normalized to a calendar date
///
/// The API returns either a plain date or a datetime; only the date part
/// matters for receipts and sorting. Missing or unparsable values are `None`.
fn date_start(property: &Value) -> Option<NaiveDate> {
    let start = property["date"]["start"].as_str()?;
    parse_iso_date(start)
}

/// Parse an ISO date or datetime string into its calendar date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_page() -> Value {
        json!({
            "id": "t1",
            "properties": {
                "Name": { "title": [ { "plain_text": "Buy milk" } ] },
                "Project": { "relation": [ { "id": "p1" } ] },
                "Priority": { "select": { "name": "High" } },
                "Planned start": { "date": null },
                "Due date": { "date": { "start": "2024-07-05" } },
                "Description": { "rich_text": [] },
                "Printed": { "checkbox": false },
                "Done": { "status": { "name": "In progress" } }
            }
        })
    }

    #[test]
    fn test_parse_task_page() {
        let projects = HashMap::from([("p1".to_string(), "Groceries".to_string())]);
        let task = parse_task_page(&sample_page(), &projects);

        assert_eq!(task.id, "t1");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.project, "Groceries");
        assert_eq!(task.priority, "High");
        assert_eq!(task.planned_start, None);
        assert_eq!(
            task.due_date,
            NaiveDate::parse_from_str("2024-07-05", "%Y-%m-%d").ok()
        );
        assert_eq!(task.description, "");
        assert!(!task.printed);
        assert!(!task.done);
    }

    #[test]
    fn test_unknown_project_is_empty() {
        let task = parse_task_page(&sample_page(), &HashMap::new());
        assert_eq!(task.project, "");
    }

    #[test]
    fn test_done_status() {
        let mut page = sample_page();
        page["properties"]["Done"]["status"]["name"] = json!("Done");
        let task = parse_task_page(&page, &HashMap::new());
        assert!(task.done);
    }

    #[test]
    fn test_missing_properties_normalize() {
        let page = json!({ "id": "t9", "properties": {} });
        let task = parse_task_page(&page, &HashMap::new());

        assert_eq!(task.id, "t9");
        assert_eq!(task.title, "");
        assert_eq!(task.project, "");
        assert_eq!(task.planned_start, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_referenced_project_ids() {
        let pages = vec![
            sample_page(),
            json!({ "id": "t2", "properties": { "Project": { "relation": [] } } }),
            json!({ "id": "t3", "properties": { "Project": { "relation": [ { "id": "p2" } ] } } }),
        ];

        let ids = referenced_project_ids(&pages);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("p1"));
        assert!(ids.contains("p2"));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2024-07-05"),
            NaiveDate::parse_from_str("2024-07-05", "%Y-%m-%d").ok()
        );
        // Datetime values keep only the date part
        assert_eq!(
            parse_iso_date("2024-07-05T10:30:00.000+02:00"),
            NaiveDate::parse_from_str("2024-07-05", "%Y-%m-%d").ok()
        );
        assert_eq!(parse_iso_date("not a date"), None);
        assert_eq!(parse_iso_date(""), None);
    }
}

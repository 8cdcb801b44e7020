//! Receipt renderer
//!
//! Renders tasks into ESC/POS instruction sequences for thermal printers.
//! Pure layout code: it never touches the counter or the device, and the
//! print timestamp is supplied by the caller.

use chrono::{NaiveDate, NaiveDateTime};
use receipt_printer::{Align, EscPosBuilder};

use super::wrap::wrap;
use crate::taskstore::Task;

/// Placeholder for missing date values
const DATE_PLACEHOLDER: &str = "—";

/// Task/summary receipt renderer
///
/// Holds the layout configuration derived from paper width and settings.
pub struct ReceiptRenderer {
    width: usize,
    indent: usize,
    base_url: String,
    no_project_label: String,
    max_number: u64,
}

impl ReceiptRenderer {
    /// Create a renderer
    ///
    /// `max_number` is the counter ceiling; it only determines the zero
    /// padding of the printed receipt number (99 prints "01".."99").
    pub fn new(
        width: usize,
        indent: usize,
        base_url: impl Into<String>,
        no_project_label: impl Into<String>,
        max_number: u64,
    ) -> Self {
        Self {
            width: width.max(1),
            indent,
            base_url: base_url.into(),
            no_project_label: no_project_label.into(),
            max_number: max_number.max(1),
        }
    }

    /// Render a single task receipt to ESC/POS bytes
    pub fn render_task(&self, task: &Task, number: u64, printed_at: NaiveDateTime) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        // Receipt number: right-aligned, emphasized, triple size, zero-padded
        b.bold(true).triple_size();
        b.align(Align::Right);
        b.line(&self.padded_number(number));

        // Project header at double size (placeholder when the task has no
        // project), one tier below the number
        b.double_size();
        b.align(Align::Center);
        if task.project.trim().is_empty() {
            b.line(&self.no_project_label);
        } else {
            b.line(&task.project);
        }

        // Priority line, or a blank line so the header height stays constant
        if task.priority.trim().is_empty() {
            b.blank();
        } else {
            b.line(&task.priority);
        }

        b.reset_size().bold(false);
        b.rule();
        b.blank();

        // Title, wrapped and indented
        b.align(Align::Left);
        b.line("Task");
        self.wrapped_block(&mut b, &task.title);
        b.blank();

        // Dates, right-justified to the paper width
        b.line_lr("Planned start", &date_or_placeholder(task.planned_start));
        b.line_lr("Due date", &date_or_placeholder(task.due_date));
        b.blank();

        // Description only when present
        if !task.description.trim().is_empty() {
            b.line("Description");
            self.wrapped_block(&mut b, &task.description);
            b.blank();
        }

        b.align(Align::Center);
        b.rule();

        // QR code linking back to the task
        b.qr_code(&format!("{}/tasks/{}", self.base_url, task.id), 6);
        b.line("Scan to mark as DONE");
        b.blank();
        b.rule();
        b.blank();

        b.line(&format!(
            "Printed at: {}",
            printed_at.format("%Y-%m-%d %H:%M:%S")
        ));

        b.cut();
        b.build()
    }

    /// Render the todo summary receipt to ESC/POS bytes
    ///
    /// Tasks are expected in their final print order; no receipt number is
    /// consumed for summaries.
    pub fn render_summary(&self, tasks: &[Task], printed_at: NaiveDateTime) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        b.align(Align::Center);
        b.line("ToDo Summary");
        b.line(&format!("{} tasks", tasks.len()));
        b.rule();

        b.align(Align::Left);
        for (i, task) in tasks.iter().enumerate() {
            for (j, line) in wrap(&task.title, self.width.saturating_sub(2))
                .iter()
                .enumerate()
            {
                if j == 0 {
                    b.line(&format!("• {}", line));
                } else {
                    b.line(line);
                }
            }

            if let Some(due) = task.due_date {
                b.line(&format!("  Due: {}", due.format("%Y-%m-%d")));
            }
            if !task.priority.trim().is_empty() {
                b.line(&format!("  Prio: {}", task.priority));
            }
            if let Some(start) = task.planned_start {
                b.line(&format!("  Start: {}", start.format("%Y-%m-%d")));
            }
            if !task.project.trim().is_empty() {
                b.line(&format!("  Project: {}", task.project));
            }

            if i + 1 < tasks.len() {
                b.blank();
            }
        }

        b.align(Align::Center);
        b.rule();
        b.line(&format!(
            "Printed at: {}",
            printed_at.format("%Y-%m-%d %H:%M:%S")
        ));

        b.cut();
        b.build()
    }

    /// Zero-pad `number` to the digit width of the counter ceiling
    fn padded_number(&self, number: u64) -> String {
        let digits = self.max_number.to_string().len();
        format!("{:0width$}", number, width = digits)
    }

    fn wrapped_block(&self, b: &mut EscPosBuilder, text: &str) {
        let wrap_width = self.width.saturating_sub(self.indent);
        let pad = " ".repeat(self.indent);
        for line in wrap(text, wrap_width) {
            b.line(&format!("{}{}", pad, line));
        }
    }
}

fn date_or_placeholder(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn renderer() -> ReceiptRenderer {
        ReceiptRenderer::new(48, 4, "http://localhost:8000", "No Project", 99)
    }

    fn test_task() -> Task {
        Task {
            id: "t1".to_string(),
            project: "".to_string(),
            priority: "High".to_string(),
            title: "Buy milk".to_string(),
            planned_start: None,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 5),
            description: "".to_string(),
            printed: false,
            done: false,
        }
    }

    fn printed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn render_str(task: &Task, number: u64) -> String {
        String::from_utf8_lossy(&renderer().render_task(task, number, printed_at())).to_string()
    }

    #[test]
    fn test_number_zero_padded() {
        let s = render_str(&test_task(), 1);
        assert!(s.contains("01\n"));
    }

    #[test]
    fn test_padding_follows_ceiling_width() {
        let r = ReceiptRenderer::new(48, 4, "http://localhost:8000", "No Project", 999);
        let s =
            String::from_utf8_lossy(&r.render_task(&test_task(), 7, printed_at())).to_string();
        assert!(s.contains("007\n"));
    }

    #[test]
    fn test_number_one_size_tier_above_project() {
        let bytes = renderer().render_task(&test_task(), 1, printed_at());

        // The number prints at triple size, the project header at double
        let triple = bytes
            .windows(3)
            .position(|w| w == [0x1D, 0x21, 0x22])
            .unwrap();
        let double = bytes
            .windows(3)
            .position(|w| w == [0x1D, 0x21, 0x11])
            .unwrap();
        assert!(triple < double);
    }

    #[test]
    fn test_project_placeholder_when_blank() {
        let s = render_str(&test_task(), 1);
        assert!(s.contains("No Project"));

        let mut task = test_task();
        task.project = "Project Alpha".to_string();
        let s = render_str(&task, 1);
        assert!(s.contains("Project Alpha"));
        assert!(!s.contains("No Project"));
    }

    #[test]
    fn test_title_unwrapped_when_short() {
        let s = render_str(&test_task(), 1);
        assert!(s.contains("    Buy milk\n"));
    }

    #[test]
    fn test_long_title_wraps_with_indent() {
        let mut task = test_task();
        task.title =
            "Special financial knowledge workshop so much fun to attend this year".to_string();
        let s = render_str(&task, 1);
        // Wrapped to 44 chars, every content line carries the 4-space indent
        assert!(s.contains("    Special financial knowledge workshop so much\n"));
        assert!(s.contains("    fun to attend this year\n"));
    }

    #[test]
    fn test_missing_dates_render_placeholder() {
        let s = render_str(&test_task(), 1);
        assert!(s.contains("Planned start"));
        assert!(s.contains("—"));
        assert!(s.contains("2024-07-05"));
    }

    #[test]
    fn test_date_right_justified() {
        let s = render_str(&test_task(), 1);
        // "Due date" (8) + 30 spaces + "2024-07-05" (10) = 48 chars
        let expected = format!("Due date{}2024-07-05\n", " ".repeat(30));
        assert!(s.contains(&expected));
    }

    #[test]
    fn test_description_block_elided_when_blank() {
        let s = render_str(&test_task(), 1);
        assert!(!s.contains("Description"));

        let mut task = test_task();
        task.description = "Remember the oat one".to_string();
        let s = render_str(&task, 1);
        assert!(s.contains("Description"));
        assert!(s.contains("    Remember the oat one\n"));
    }

    #[test]
    fn test_qr_payload_and_caption() {
        let s = render_str(&test_task(), 1);
        assert!(s.contains("http://localhost:8000/tasks/t1"));
        assert!(s.contains("Scan to mark as DONE"));
    }

    #[test]
    fn test_timestamp_footer_and_cut() {
        let data = renderer().render_task(&test_task(), 1, printed_at());
        let s = String::from_utf8_lossy(&data).to_string();
        assert!(s.contains("Printed at: 2024-07-01 09:30:00"));
        // Cut is the final command
        assert_eq!(&data[data.len() - 3..], &[0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_summary_layout() {
        let mut second = test_task();
        second.id = "t2".to_string();
        second.title = "Organize workspace".to_string();
        second.project = "Project Alpha".to_string();
        second.priority = "".to_string();
        second.due_date = None;

        let data = renderer().render_summary(&[test_task(), second], printed_at());
        let s = String::from_utf8_lossy(&data).to_string();

        assert!(s.contains("ToDo Summary"));
        assert!(s.contains("2 tasks"));
        assert!(s.contains("• Buy milk"));
        assert!(s.contains("  Due: 2024-07-05"));
        assert!(s.contains("  Prio: High"));
        assert!(s.contains("• Organize workspace"));
        assert!(s.contains("  Project: Project Alpha"));
        // Second task has no priority line
        assert_eq!(s.matches("  Prio:").count(), 1);
    }
}

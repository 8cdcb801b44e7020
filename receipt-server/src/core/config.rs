use thiserror::Error;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | PRINTER_HOST | required | printer address |
/// | PRINTER_PORT | 9100 | raw TCP printing port |
/// | PAPER_WIDTH_MM | 80 | 58 or 80 |
/// | RECEIPT_NUMBER_RESET_AT | 99 | receipt numbers wrap back to 1 after this |
/// | WRAP_INDENT | 4 | indent for wrapped title/description lines |
/// | BASE_URL | http://localhost:8000 | base for QR payloads |
/// | NO_PROJECT_TEXT | No Project | header placeholder for projectless tasks |
/// | NOTION_TOKEN | required | workspace database token |
/// | NOTION_TASKS_ID | required | tasks data source id |
/// | NOTION_PROJECTS_ID | required | projects data source id |
/// | HTTP_PORT | 8000 | HTTP service port |
/// | WORK_DIR | ./data | counter database location |
#[derive(Debug, Clone)]
pub struct Config {
    /// Printer network address
    pub printer_host: String,
    /// Printer raw TCP port
    pub printer_port: u16,
    /// Paper width in millimeters (58 or 80)
    pub paper_width_mm: u32,
    /// Characters per line, derived from paper width
    pub chars_per_line: usize,
    /// Receipt number ceiling; the counter cycles 1..=reset_at
    pub receipt_reset_at: u64,
    /// Indent for wrapped title/description lines
    pub wrap_indent: usize,
    /// Base URL embedded in receipt QR codes
    pub base_url: String,
    /// Placeholder header for tasks without a project
    pub no_project_text: String,
    /// Workspace database API token
    pub notion_token: String,
    /// Tasks data source id
    pub notion_tasks_id: String,
    /// Projects data source id
    pub notion_projects_id: String,
    /// HTTP API port
    pub http_port: u16,
    /// Working directory for persisted state
    pub work_dir: String,
}

/// Configuration errors - fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set in the environment")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Characters per line for the supported paper widths
fn chars_for_width(paper_width_mm: u32) -> Option<usize> {
    match paper_width_mm {
        58 => Some(32),
        80 => Some(48),
        _ => None,
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: v.clone(),
        }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing required settings are an error; the process must not serve
    /// traffic without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let paper_width_mm: u32 = parse_or("PAPER_WIDTH_MM", 80)?;
        let chars_per_line = chars_for_width(paper_width_mm).ok_or(ConfigError::Invalid {
            key: "PAPER_WIDTH_MM",
            value: paper_width_mm.to_string(),
        })?;

        let receipt_reset_at: u64 = parse_or("RECEIPT_NUMBER_RESET_AT", 99)?;
        if receipt_reset_at == 0 {
            return Err(ConfigError::Invalid {
                key: "RECEIPT_NUMBER_RESET_AT",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            printer_host: required("PRINTER_HOST")?,
            printer_port: parse_or("PRINTER_PORT", 9100)?,
            paper_width_mm,
            chars_per_line,
            receipt_reset_at,
            wrap_indent: parse_or("WRAP_INDENT", 4)?,
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            no_project_text: std::env::var("NO_PROJECT_TEXT")
                .unwrap_or_else(|_| "No Project".into()),
            notion_token: required("NOTION_TOKEN")?,
            notion_tasks_id: required("NOTION_TASKS_ID")?,
            notion_projects_id: required("NOTION_PROJECTS_ID")?,
            http_port: parse_or("HTTP_PORT", 8000)?,
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_width_to_chars() {
        assert_eq!(chars_for_width(58), Some(32));
        assert_eq!(chars_for_width(80), Some(48));
        assert_eq!(chars_for_width(76), None);
    }

    #[test]
    fn test_required_rejects_blank() {
        // SAFETY: test-local variable name, not read by other tests
        unsafe { std::env::set_var("TEST_BLANK_SETTING", "  ") };
        assert!(matches!(
            required("TEST_BLANK_SETTING"),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_parse_or_default() {
        let port: u16 = parse_or("TEST_UNSET_PORT_SETTING", 9100).unwrap();
        assert_eq!(port, 9100);
    }
}

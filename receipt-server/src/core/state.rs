use std::path::Path;
use std::sync::Arc;

use receipt_printer::NetworkPrinter;

use crate::core::Config;
use crate::printing::{PrintService, ReceiptCounter, ReceiptRenderer};
use crate::taskstore::TaskStore;

/// Server state - shared references to all services
///
/// Cloned per request by axum; all fields are cheap shared handles.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | store | workspace database client |
/// | print | print orchestration (counter + renderer + device) |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Workspace database client
    pub store: Arc<TaskStore>,
    /// Print orchestrator
    pub print: Arc<PrintService<NetworkPrinter>>,
}

impl ServerState {
    /// Initialize all services from configuration
    ///
    /// Opens (or creates) the counter database under the work dir and wires
    /// up the printer, renderer and task store client.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let work_dir = Path::new(&config.work_dir);
        std::fs::create_dir_all(work_dir)?;

        let counter = ReceiptCounter::open(work_dir.join("counters.redb"))?;

        let renderer = ReceiptRenderer::new(
            config.chars_per_line,
            config.wrap_indent,
            &config.base_url,
            &config.no_project_text,
            config.receipt_reset_at,
        );

        let printer = NetworkPrinter::new(&config.printer_host, config.printer_port);

        let print = PrintService::new(counter, renderer, printer, config.receipt_reset_at);

        let store = TaskStore::new(
            &config.notion_token,
            &config.notion_tasks_id,
            &config.notion_projects_id,
        );

        Ok(Self {
            config: config.clone(),
            store: Arc::new(store),
            print: Arc::new(print),
        })
    }
}

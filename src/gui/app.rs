//! Brewboard Main Application
//! Main window: filter panel on the left, dashboard on the right. CSV
//! loading runs on a background thread; filter changes recompute the
//! dashboard synchronously from the cached immutable table.

use crate::analytics::DashboardData;
use crate::data::{ContentDigest, CsvSchema, DataLoader, SalesTable, TableCache};
use crate::gui::{DashboardView, FilterPanel, FilterPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Data file loaded at startup when present.
const DEFAULT_DATA_PATH: &str = "data/coffee_sales.csv";

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        table: SalesTable,
        digest: ContentDigest,
    },
    Unchanged {
        digest: ContentDigest,
    },
    Error(String),
}

/// Main application window.
pub struct BrewboardApp {
    cache: TableCache,
    table: Option<Arc<SalesTable>>,
    filter_panel: FilterPanel,
    dashboard: DashboardView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    pending_path: Option<PathBuf>,
    is_loading: bool,
}

impl BrewboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            cache: TableCache::new(),
            table: None,
            filter_panel: FilterPanel::new(),
            dashboard: DashboardView::new(),
            load_rx: None,
            pending_path: None,
            is_loading: false,
        };

        let default_path = PathBuf::from(DEFAULT_DATA_PATH);
        if default_path.is_file() {
            app.start_load(default_path);
        } else {
            app.filter_panel
                .set_status("No data file found - browse for a CSV");
        }

        app
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Start loading a CSV in a background thread.
    fn start_load(&mut self, path: PathBuf) {
        self.filter_panel.csv_path = Some(path.clone());
        self.filter_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let known_digest = self.cache.cached_digest(&path);
        self.pending_path = Some(path.clone());

        thread::spawn(move || {
            Self::run_load(tx, path, known_digest);
        });
    }

    /// Load a CSV (called from background thread). Skips parsing when the
    /// content digest matches the cached one.
    fn run_load(tx: Sender<LoadResult>, path: PathBuf, known_digest: Option<ContentDigest>) {
        let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

        let digest = match TableCache::digest_of(&path) {
            Ok(digest) => digest,
            Err(e) => {
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        if known_digest == Some(digest) {
            info!(path = %path.display(), "file content unchanged, reusing cached table");
            let _ = tx.send(LoadResult::Unchanged { digest });
            return;
        }

        let _ = tx.send(LoadResult::Progress("Parsing rows...".to_string()));

        let result = CsvSchema::for_data_file(&path)
            .and_then(|schema| DataLoader::new(schema).load(&path));

        match result {
            Ok(table) => {
                let _ = tx.send(LoadResult::Complete { table, digest });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed");
                let _ = tx.send(LoadResult::Error(e.to_string()));
            }
        }
    }

    /// Check for CSV loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.filter_panel.set_status(&status);
                    }
                    LoadResult::Complete { table, digest } => {
                        if let Some(path) = self.pending_path.take() {
                            let table = self.cache.store(&path, digest, table);
                            self.install_table(table, true);
                        }
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Unchanged { digest } => {
                        if let Some(path) = self.pending_path.take() {
                            if let Some(table) = self.cache.lookup(&path, digest) {
                                self.install_table(table, false);
                            }
                        }
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.filter_panel.set_status(&format!("Error: {}", error));
                        self.dashboard.data = None;
                        self.table = None;
                        self.pending_path = None;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Make a loaded table current. `reset_selections` repopulates the
    /// filter widgets (fresh content); a cache hit keeps them as they are.
    fn install_table(&mut self, table: Arc<SalesTable>, reset_selections: bool) {
        if reset_selections || self.table.is_none() {
            self.filter_panel
                .update_options(table.distinct_countries(), table.distinct_coffee_types());
        }
        self.table = Some(table);
        self.refresh();
    }

    /// Re-run filter + aggregate against the current table.
    fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.dashboard.data = None;
            return;
        };

        let criteria = self.filter_panel.criteria();
        let filtered = table.filter(&criteria);
        self.dashboard.data = Some(DashboardData::compute(&filtered));
        self.filter_panel
            .set_status(&format!("Showing {} of {} rows", filtered.len(), table.len()));
    }
}

impl eframe::App for BrewboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filters
        SidePanel::left("filter_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.filter_panel.show(ui);

                    match action {
                        FilterPanelAction::BrowseCsv => self.handle_browse_csv(),
                        FilterPanelAction::FilterChanged => self.refresh(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}

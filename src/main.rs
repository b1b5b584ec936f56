//! Brewboard - Coffee Sales Dashboard
//!
//! Loads a CSV of coffee sales, filters by country and coffee type,
//! and shows KPIs plus sales charts.

mod analytics;
mod charts;
mod data;
mod fmt;
mod gui;

use eframe::egui;
use gui::BrewboardApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([1000.0, 620.0])
            .with_title("Brewboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Brewboard",
        options,
        Box::new(|cc| Ok(Box::new(BrewboardApp::new(cc)))),
    )
}

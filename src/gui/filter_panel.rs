//! Filter Panel Widget
//! Left side panel: data source picker and the country / coffee-type
//! multi-selects.

use crate::data::FilterCriteria;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Left side panel with the file picker and filter checkboxes.
pub struct FilterPanel {
    pub csv_path: Option<PathBuf>,
    pub countries: Vec<String>,
    pub coffee_types: Vec<String>,
    pub selected_countries: Vec<bool>,
    pub selected_coffee_types: Vec<bool>,
    pub status: String,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            countries: Vec::new(),
            coffee_types: Vec::new(),
            selected_countries: Vec::new(),
            selected_coffee_types: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repopulate the selection widgets after a load. Everything starts
    /// selected, matching the dashboard's "show all" default.
    pub fn update_options(&mut self, countries: Vec<String>, coffee_types: Vec<String>) {
        self.selected_countries = vec![true; countries.len()];
        self.selected_coffee_types = vec![true; coffee_types.len()];
        self.countries = countries;
        self.coffee_types = coffee_types;
    }

    /// Current selections as filter criteria.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            countries: Self::selected(&self.countries, &self.selected_countries),
            coffee_types: Self::selected(&self.coffee_types, &self.selected_coffee_types),
        }
    }

    fn selected(
        values: &[String],
        flags: &[bool],
    ) -> std::collections::HashSet<String> {
        values
            .iter()
            .zip(flags.iter())
            .filter(|(_, &on)| on)
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// Draw the panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("☕ Brewboard")
                    .size(22.0)
                    .color(Color32::from_rgb(196, 148, 107)),
            );
            ui.label(
                RichText::new("Coffee Sales Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = FilterPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔎 Filter Here").size(14.0).strong());
        ui.add_space(8.0);

        if Self::draw_multiselect(
            ui,
            "Country",
            &self.countries,
            &mut self.selected_countries,
        ) {
            action = FilterPanelAction::FilterChanged;
        }

        ui.add_space(10.0);

        if Self::draw_multiselect(
            ui,
            "Coffee Type",
            &self.coffee_types,
            &mut self.selected_coffee_types,
        ) {
            action = FilterPanelAction::FilterChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Showing") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Checkbox list with Select All / Clear All. Returns true if any
    /// selection changed.
    fn draw_multiselect(
        ui: &mut egui::Ui,
        label: &str,
        values: &[String],
        flags: &mut [bool],
    ) -> bool {
        let mut changed = false;

        ui.label(format!("{label}:"));
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(label.to_string())
                    .max_height(140.0)
                    .show(ui, |ui| {
                        if values.is_empty() {
                            ui.label(RichText::new("No values").size(11.0).color(Color32::GRAY));
                        }
                        for (i, value) in values.iter().enumerate() {
                            if i < flags.len() && ui.checkbox(&mut flags[i], value).changed() {
                                changed = true;
                            }
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() && !flags.iter().all(|&v| v) {
                flags.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() && flags.iter().any(|&v| v) {
                flags.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });

        changed
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    BrowseCsv,
    FilterChanged,
}

//! Dashboard View Widget
//! Central panel: KPI metric cards and the two sales charts.

use crate::analytics::DashboardData;
use crate::charts::ChartPlotter;
use crate::fmt;
use egui::{Color32, RichText, ScrollArea};

/// Central dashboard area. Holds the latest derived snapshot; `None`
/// until a table has been loaded.
#[derive(Default)]
pub struct DashboardView {
    pub data: Option<DashboardData>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dashboard.
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.add_space(5.0);
            ui.label(RichText::new("☕ Coffee Sales Dashboard").size(24.0).strong());
            ui.add_space(12.0);

            // KPI row
            ui.columns(3, |cols| {
                Self::draw_kpi_card(
                    &mut cols[0],
                    "Total Sales",
                    &fmt::money(data.kpis.total_sales),
                );
                Self::draw_kpi_card(
                    &mut cols[1],
                    "Total Profit",
                    &fmt::money(data.kpis.total_profit),
                );
                Self::draw_kpi_card(
                    &mut cols[2],
                    "Items Sold",
                    &fmt::count(data.kpis.items_sold),
                );
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(12.0);

            // Charts side by side
            ui.columns(2, |cols| {
                Self::draw_chart_card(&mut cols[0], "Sales by Coffee Type", |ui| {
                    if data.by_coffee_type.is_empty() {
                        Self::draw_empty_chart(ui);
                    } else {
                        ChartPlotter::draw_sales_by_coffee_type(ui, &data.by_coffee_type);
                    }
                });
                Self::draw_chart_card(&mut cols[1], "Monthly Sales Trend", |ui| {
                    if data.monthly_trend.is_empty() {
                        Self::draw_empty_chart(ui);
                    } else {
                        ChartPlotter::draw_monthly_trend(ui, &data.monthly_trend);
                    }
                });
            });
        });
    }

    fn draw_kpi_card(ui: &mut egui::Ui, title: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(24.0).strong());
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, title: &str, draw: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                draw(ui);
            });
    }

    fn draw_empty_chart(ui: &mut egui::Ui) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("No data for current filter")
                    .size(13.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(40.0);
    }
}

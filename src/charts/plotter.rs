//! Chart Plotter Module
//! Interactive dashboard charts using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::analytics::{CoffeeTypeSales, MonthlySales};

/// Coffee brown, the dashboard's bar color.
pub const BAR_COLOR: Color32 = Color32::from_rgb(111, 78, 55);
/// Trend line color.
pub const TREND_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

const CHART_HEIGHT: f32 = 320.0;

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Horizontal bar chart of total sales per coffee type, one bar per
    /// group in the order given (ascending by total).
    pub fn draw_sales_by_coffee_type(ui: &mut egui::Ui, groups: &[CoffeeTypeSales]) {
        let bars: Vec<Bar> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Bar::new(i as f64, g.total_sales)
                    .width(0.6)
                    .fill(BAR_COLOR)
                    .name(&g.coffee_type)
            })
            .collect();

        let y_labels: Vec<String> = groups.iter().map(|g| g.coffee_type.clone()).collect();
        let n = y_labels.len();

        Plot::new("sales_by_coffee_type")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Total Sales")
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < y_labels.len() {
                    y_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Sales"));
            });
    }

    /// Line chart of monthly sales, one point per month bucket in
    /// chronological order, labeled `YYYY-MM`.
    pub fn draw_monthly_trend(ui: &mut egui::Ui, trend: &[MonthlySales]) {
        let points_vec: Vec<[f64; 2]> = trend
            .iter()
            .enumerate()
            .map(|(i, m)| [i as f64, m.total_sales])
            .collect();

        let x_labels: Vec<String> = trend
            .iter()
            .map(|m| m.month_end.format("%Y-%m").to_string())
            .collect();
        let n = x_labels.len();
        // Thin the axis marks when there are many months.
        let step = (n / 12).max(1);

        Plot::new("monthly_trend")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .y_axis_label("Total Sales")
            .x_grid_spacer(move |_input| {
                (0..n)
                    .step_by(step)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .color(TREND_COLOR)
                        .width(2.0)
                        .name("Monthly Sales"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .radius(3.5)
                        .color(TREND_COLOR),
                );
            });
    }
}

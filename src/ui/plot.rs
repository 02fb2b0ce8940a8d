use eframe::egui::{self, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::Theme;
use crate::data::aggregate::{MonthlySeries, Ranking};
use crate::data::model::Month;

// ---------------------------------------------------------------------------
// Monthly trend (line chart)
// ---------------------------------------------------------------------------

/// Line chart of total cases per month, x positioned by calendar month.
pub fn monthly_trend(ui: &mut Ui, series: &MonthlySeries, theme: &Theme) {
    chart_title(ui, &series.title, theme);

    if series.points.is_empty() {
        empty_notice(ui, theme);
        return;
    }

    let coords: Vec<[f64; 2]> = series
        .points
        .iter()
        .map(|&(month, value)| [month.index() as f64, value])
        .collect();

    Plot::new("monthly_trend")
        .x_axis_label(RichText::new("Mes").color(theme.text))
        .y_axis_label(RichText::new("Casos").color(theme.text))
        .x_axis_formatter(|mark, _range| month_tick(mark.value))
        .label_formatter(|_name, point| {
            format!("{}\nCasos: {:.0}", month_tick(point.x), point.y)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Casos")
                    .color(theme.emphasis)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .name("Casos")
                    .color(theme.emphasis)
                    .radius(4.0),
            );
        });
}

/// Month name for an integral x position, empty between months.
fn month_tick(x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    Month::from_index(rounded as usize)
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Ranked groups (horizontal bar chart)
// ---------------------------------------------------------------------------

/// Horizontal bar chart with the leader drawn at the top.
pub fn ranking_chart(ui: &mut Ui, id: &str, ranking: &Ranking, theme: &Theme) {
    chart_title(ui, &ranking.title, theme);

    if ranking.is_empty() {
        empty_notice(ui, theme);
        return;
    }

    let n = ranking.bars.len();
    // Bars are placed bottom-up, so rank 0 gets the highest position.
    let labels: Vec<String> = ranking.bars.iter().rev().map(|b| b.label.clone()).collect();

    let bars: Vec<Bar> = ranking
        .bars
        .iter()
        .enumerate()
        .map(|(rank, bar)| {
            Bar::new((n - 1 - rank) as f64, bar.value)
                .name(&bar.label)
                .width(0.7)
                .fill(theme.bar_fill(bar))
                .stroke(Stroke::new(1.0, theme.bar_outline(bar)))
        })
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{:.0}", bar.name, bar.value)
        }));

    Plot::new(id)
        .x_axis_label(RichText::new(ranking.measure.clone()).color(theme.text))
        .y_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        })
        .y_axis_min_width(160.0)
        .show_grid([true, false])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn chart_title(ui: &mut Ui, title: &str, theme: &Theme) {
    ui.label(RichText::new(title).color(theme.text).strong().size(16.0));
    ui.add_space(4.0);
}

fn empty_notice(ui: &mut Ui, theme: &Theme) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new("Sin datos para la selección actual.")
                .color(theme.text)
                .size(16.0),
        );
    });
}

/// Paint the chart area with the theme background.
pub fn themed_frame(theme: &Theme) -> egui::Frame {
    egui::Frame::default().fill(theme.background)
}

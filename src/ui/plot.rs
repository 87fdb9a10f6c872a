use std::collections::BTreeMap;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::chart::selection::{ScatterSelection, SelectionEvent, SelectionRect};
use crate::chart::spec::{GroupedHistogramSpec, HeatmapSpec, HistogramSpec, ScatterMatrixSpec};
use crate::chart::ChartSpec;
use crate::color::{contrasting_text, correlation_color, generate_palette, normalize};
use crate::state::AppState;

const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
const DIMMED: Color32 = Color32::from_rgba_premultiplied(90, 90, 90, 60);

// ---------------------------------------------------------------------------
// Chart region (central panel)
// ---------------------------------------------------------------------------

/// Draw the current chart, stretched to the available width.
pub fn chart(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new(state.chart().title()).size(18.0).strong());

    let events = match state.chart() {
        ChartSpec::Histogram(spec) => {
            histogram(ui, spec);
            Vec::new()
        }
        ChartSpec::GroupedHistogram(spec) => {
            grouped_histogram(ui, spec);
            Vec::new()
        }
        ChartSpec::Heatmap(spec) => {
            heatmap(ui, spec);
            Vec::new()
        }
        ChartSpec::ScatterMatrix(spec) => scatter_matrix(ui, spec, &state.selection),
    };

    for event in events {
        state.apply_selection(event);
    }
}

fn histogram(ui: &mut Ui, spec: &HistogramSpec) {
    let bars: Vec<Bar> = spec
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.2} – {:.2}", b.start, b.end))
        })
        .collect();

    Plot::new("histogram")
        .legend(Legend::default())
        .x_axis_label(spec.column.as_str())
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(BAR_COLOR)
                    .name(format!("{} ({} bins)", spec.column, spec.nbins)),
            );
        });
}

fn grouped_histogram(ui: &mut Ui, spec: &GroupedHistogramSpec) {
    let n_groups = spec.groups.len().max(1);
    let width = 0.8 / n_groups as f64;
    let palette = generate_palette(spec.groups.len());

    let categories = spec.categories.clone();
    Plot::new("grouped_histogram")
        .legend(Legend::default())
        .x_axis_label(spec.x_column.as_str())
        .y_axis_label("count")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&categories, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (g, (group, color)) in spec.groups.iter().zip(&palette).enumerate() {
                let offset = (g as f64 - (n_groups as f64 - 1.0) / 2.0) * width;
                let bars = group
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(c, &count)| Bar::new(c as f64 + offset, count as f64).width(width))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(*color)
                        .name(format!("{} = {}", spec.group_column, group.label)),
                );
            }
        });
}

/// Tick label for a categorical axis: only integer positions are named.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn heatmap(ui: &mut Ui, spec: &HeatmapSpec) {
    let n = spec.labels.len();
    let x_labels = spec.labels.clone();
    let y_labels = spec.labels.clone();

    Plot::new("heatmap")
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&x_labels, mark.value))
        // Row 0 is drawn at the top, so y positions are negated.
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&y_labels, -mark.value))
        .show(ui, |plot_ui| {
            for (i, row) in spec.values.iter().enumerate().take(n) {
                for (j, &r) in row.iter().enumerate().take(n) {
                    let (x, y) = (j as f64, -(i as f64));
                    let fill = correlation_color(r);
                    let cell = PlotPoints::new(vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ]);
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    if spec.annotate && !r.is_nan() {
                        plot_ui.text(
                            Text::new(PlotPoint::new(x, y), format!("{r:.2}"))
                                .color(contrasting_text(fill)),
                        );
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter matrix
// ---------------------------------------------------------------------------

/// Draw the lower triangle (diagonal included) as a grid of small plots and
/// report drag input for box selection.
fn scatter_matrix(
    ui: &mut Ui,
    spec: &ScatterMatrixSpec,
    selection: &ScatterSelection,
) -> Vec<SelectionEvent> {
    let n = spec.dimensions.len();
    if n == 0 || spec.point_count() == 0 {
        ui.label("No complete numeric records to plot.");
        return Vec::new();
    }

    let (cmin, cmax) = spec
        .color
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let point_color = |k: usize| -> Color32 {
        if !selection.is_highlighted(k) {
            return DIMMED;
        }
        spec.color
            .get(k)
            .map(|&c| spec.color_scale.sample(normalize(c, cmin, cmax)))
            .unwrap_or(BAR_COLOR)
    };

    ui.horizontal(|ui: &mut Ui| {
        match selection.selected() {
            Some(sel) => ui.label(format!(
                "{} of {} records selected (double-click to clear)",
                sel.len(),
                spec.point_count()
            )),
            None => ui.label("Drag inside a panel to select records"),
        };
        if spec.show_scale {
            color_legend(ui, spec, cmin, cmax);
        }
    });

    let side = (ui.available_width().min(ui.available_height()) / n as f32 - 6.0).max(60.0);
    let mut events = Vec::new();

    egui::Grid::new("scatter_matrix")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for row in 0..n {
                for col in 0..n {
                    if col > row && !spec.show_upper_half {
                        ui.allocate_space(egui::vec2(side, side));
                        continue;
                    }
                    if let Some(event) =
                        scatter_cell(ui, spec, selection, (row, col), side, &point_color)
                    {
                        events.push(event);
                    }
                }
                ui.end_row();
            }
        });

    events
}

fn scatter_cell(
    ui: &mut Ui,
    spec: &ScatterMatrixSpec,
    selection: &ScatterSelection,
    cell: (usize, usize),
    side: f32,
    point_color: &dyn Fn(usize) -> Color32,
) -> Option<SelectionEvent> {
    let (row, col) = cell;
    let n = spec.dimensions.len();
    let xdim = &spec.dimensions[col];
    let ydim = &spec.dimensions[row];

    // Bucket points by colour so each colour is one draw call.
    let mut buckets: BTreeMap<[u8; 4], Vec<[f64; 2]>> = BTreeMap::new();
    for (k, (&x, &y)) in xdim.values.iter().zip(&ydim.values).enumerate() {
        buckets
            .entry(point_color(k).to_array())
            .or_default()
            .push([x, y]);
    }

    let mut plot = Plot::new(("scatter_cell", row, col))
        .width(side)
        .height(side)
        .show_axes([row + 1 == n, col == 0])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false);
    if row + 1 == n {
        plot = plot.x_axis_label(xdim.label.as_str());
    }
    if col == 0 {
        plot = plot.y_axis_label(ydim.label.as_str());
    }

    plot.show(ui, |plot_ui| {
        for (rgba, pts) in buckets {
            let color = Color32::from_rgba_premultiplied(rgba[0], rgba[1], rgba[2], rgba[3]);
            plot_ui.points(
                Points::new(PlotPoints::from(pts))
                    .color(color)
                    .radius(spec.marker_size / 2.0)
                    .filled(true),
            );
        }

        if let Some(rect) = selection.active_rect(cell) {
            plot_ui.polygon(selection_polygon(&rect));
        }

        let response = plot_ui.response();
        let pointer = plot_ui.pointer_coordinate().map(|p| [p.x, p.y]);
        if response.double_clicked() {
            Some(SelectionEvent::Clear)
        } else if response.drag_started() {
            pointer.map(|at| SelectionEvent::Begin(cell, at))
        } else if response.drag_stopped() {
            Some(SelectionEvent::Finish)
        } else if response.dragged() && selection.active_rect(cell).is_some() {
            pointer.map(SelectionEvent::Update)
        } else {
            None
        }
    })
    .inner
}

/// Horizontal colour bar for the point colour column.
fn color_legend(ui: &mut Ui, spec: &ScatterMatrixSpec, cmin: f64, cmax: f64) {
    const STEPS: usize = 24;
    ui.label(format!("{} {cmin:.1}", spec.color_column));
    let (rect, _) = ui.allocate_exact_size(egui::vec2(120.0, 12.0), egui::Sense::hover());
    let step = rect.width() / STEPS as f32;
    for i in 0..STEPS {
        let t = i as f64 / (STEPS - 1) as f64;
        let x = rect.left() + i as f32 * step;
        let swatch = egui::Rect::from_min_size(
            egui::pos2(x, rect.top()),
            egui::vec2(step + 0.5, rect.height()),
        );
        ui.painter()
            .rect_filled(swatch, 0.0, spec.color_scale.sample(t));
    }
    ui.label(format!("{cmax:.1}"));
}

fn selection_polygon(rect: &SelectionRect) -> Polygon<'static> {
    Polygon::new(PlotPoints::new(vec![
        [rect.x_min, rect.y_min],
        [rect.x_max, rect.y_min],
        [rect.x_max, rect.y_max],
        [rect.x_min, rect.y_max],
    ]))
    .fill_color(Color32::from_rgba_unmultiplied(100, 150, 255, 40))
    .stroke(Stroke::new(1.0, Color32::from_rgb(100, 150, 255)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(category_label(&labels, 0.0), "1");
        assert_eq!(category_label(&labels, 2.0), "3");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 7.0), "");
    }
}

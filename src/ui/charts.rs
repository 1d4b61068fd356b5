use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::PieSlice;
use crate::data::model::{Outcome, SiteSelection};
use crate::state::AppState;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x3c, 0xb3, 0x71);
const FAILURE_COLOR: Color32 = Color32::from_rgb(0xd9, 0x4f, 0x4f);

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the success pie for the current selection.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.view.pie;
    ui.vertical_centered(|ui: &mut Ui| ui.heading(&pie.title));

    let total: u64 = pie.slices.iter().map(|s| s.value).sum();
    if total == 0 {
        empty_chart(ui, height);
        return;
    }

    let colour = |slice: &PieSlice| match state.view.inputs.selection {
        SiteSelection::All => state.site_colors.color_for(&slice.label),
        SiteSelection::Site(_) if slice.label == Outcome::Success.to_string() => SUCCESS_COLOR,
        SiteSelection::Site(_) => FAILURE_COLOR,
    };

    Plot::new("success_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.1)
        .include_y(1.1)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in &pie.slices {
                // Zero slices carry a legend label in the data but no area.
                if slice.value == 0 {
                    continue;
                }
                let fraction = slice.value as f64 / total as f64;
                let color = colour(slice);

                for piece in wedge_pieces(start, fraction) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(piece))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let [x, y] = polar(start + fraction / 2.0, 0.65);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                start += fraction;
            }
        });
}

/// Point on the unit circle for a fraction of a full turn, measured clockwise
/// from twelve o'clock.
fn polar(fraction: f64, radius: f64) -> [f64; 2] {
    let theta = FRAC_PI_2 - fraction * TAU;
    [radius * theta.cos(), radius * theta.sin()]
}

/// Outline of the wedge covering `[start, start + sweep)` of the circle,
/// split into pieces no wider than a quarter turn so each polygon is convex.
pub(crate) fn wedge_pieces(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    const MAX_PIECE: f64 = 0.25;
    const SEGMENTS_PER_TURN: f64 = 128.0;

    let mut pieces = Vec::new();
    let mut from = start;
    let end = start + sweep;
    while end - from > 1e-12 {
        let to = (from + MAX_PIECE).min(end);
        let segments = (((to - from) * SEGMENTS_PER_TURN).ceil() as usize).max(1);
        let mut outline = Vec::with_capacity(segments + 2);
        outline.push([0.0, 0.0]);
        for i in 0..=segments {
            outline.push(polar(from + (to - from) * i as f64 / segments as f64, 1.0));
        }
        pieces.push(outline);
        from = to;
    }
    pieces
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload vs. outcome, coloured by booster version category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let scatter = &state.view.scatter;
    ui.vertical_centered(|ui: &mut Ui| ui.heading(&scatter.title));

    if scatter.points.is_empty() {
        empty_chart(ui, height);
        return;
    }

    // One series per category so the legend lists each once.
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &scatter.points {
        by_category
            .entry(p.booster_version_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, p.outcome.class() as f64]);
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in by_category {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Table of scatter rows
// ---------------------------------------------------------------------------

/// Tabular view of the launches currently shown in the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let points = &state.view.scatter.points;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .max_scroll_height(220.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    let color = match p.outcome {
                        Outcome::Success => SUCCESS_COLOR,
                        Outcome::Failure => FAILURE_COLOR,
                    };
                    ui.label(RichText::new(p.outcome.to_string()).color(color));
                });
                row.col(|ui| {
                    ui.label(&p.booster_version_category);
                });
            });
        });
}

fn empty_chart(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn test_polar_starts_at_twelve_and_turns_clockwise() {
        assert!(approx(polar(0.0, 1.0), [0.0, 1.0]));
        assert!(approx(polar(0.25, 1.0), [1.0, 0.0]));
        assert!(approx(polar(0.5, 2.0), [0.0, -2.0]));
    }

    #[test]
    fn test_small_wedge_is_single_piece() {
        let pieces = wedge_pieces(0.0, 0.1);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0][0], [0.0, 0.0]);
        assert!(approx(pieces[0][1], polar(0.0, 1.0)));
        assert!(approx(*pieces[0].last().unwrap(), polar(0.1, 1.0)));
    }

    #[test]
    fn test_full_circle_splits_into_quarters() {
        let pieces = wedge_pieces(0.0, 1.0);
        assert_eq!(pieces.len(), 4);
        assert!(approx(*pieces[3].last().unwrap(), polar(1.0, 1.0)));
    }

    #[test]
    fn test_zero_sweep_has_no_pieces() {
        assert!(wedge_pieces(0.3, 0.0).is_empty());
    }
}

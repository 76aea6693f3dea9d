use eframe::egui::{Align, Color32, Layout, RichText, Ui};
use egui_plot::{Arrows, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::SeriesColors;
use crate::config::{PresentationConfig, SeriesStyle};
use crate::data::ThreadTiming;
use crate::pipeline::PreparedView;

// ---------------------------------------------------------------------------
// Chart descriptions – built from a prepared view, drawn by `show_chart`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
    pub style: SeriesStyle,
}

/// Callout pointing at the minimum-time row.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    pub at: [f64; 2],
    pub text_at: [f64; 2],
    pub text: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub series: Vec<SeriesSpec>,
    /// Caption drawn over the legend when the series need telling apart.
    pub legend_title: Option<String>,
    pub annotation: Option<AnnotationSpec>,
}

/// Text of the minimum callout.
pub fn annotation_text(minimum: &ThreadTiming) -> String {
    format!(
        "Minimum time\n{} threads\n{} sec",
        minimum.thread_count, minimum.real_time_used
    )
}

/// Single-dataset chart with the minimum annotated.
pub fn single_chart(
    view: &PreparedView,
    config: &PresentationConfig,
    colors: &SeriesColors,
) -> ChartSpec {
    let table = view.active();
    let points: Vec<[f64; 2]> = table.rows().iter().map(ThreadTiming::as_point).collect();

    // Lift the label above the point by a quarter of the visible time range.
    let (lo, hi) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p[1]), hi.max(p[1]))
    });
    let span = if hi > lo { hi - lo } else { hi.abs().max(1.0) };
    let at = view.minimum.as_point();

    ChartSpec {
        id: "single_chart",
        title: format!("Execution time for {}", view.label),
        series: vec![SeriesSpec {
            name: format!("{} time vs threads", view.label),
            color: colors.color_for(view.label),
            points,
            style: config.single.clone(),
        }],
        legend_title: None,
        annotation: Some(AnnotationSpec {
            at,
            text_at: [at[0], at[1] + span * 0.25],
            text: annotation_text(&view.minimum),
            color: colors.annotation,
        }),
    }
}

/// Both datasets on one chart; `None` unless comparison is enabled.
pub fn comparison_chart(
    view: &PreparedView,
    config: &PresentationConfig,
    colors: &SeriesColors,
) -> Option<ChartSpec> {
    let comparison = view.comparison.as_ref()?;
    let series = comparison
        .iter()
        .map(|s| SeriesSpec {
            name: s.label.to_string(),
            color: colors.color_for(s.label),
            points: view
                .table(s.label)
                .rows()
                .iter()
                .map(ThreadTiming::as_point)
                .collect(),
            style: config.comparison.clone(),
        })
        .collect();

    Some(ChartSpec {
        id: "comparison_chart",
        title: "Comparison: execution time for both OS-CPU".to_string(),
        series,
        legend_title: Some(config.legend_title.clone()),
        annotation: None,
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw a chart description into the given ui.
pub fn show_chart(ui: &mut Ui, chart: &ChartSpec, config: &PresentationConfig) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&chart.title).size(20.0).strong());
    });
    if let Some(legend_title) = &chart.legend_title {
        ui.with_layout(Layout::right_to_left(Align::Min), |ui: &mut Ui| {
            ui.label(RichText::new(legend_title).strong());
        });
    }

    Plot::new(chart.id)
        .legend(Legend::default())
        .x_axis_label(config.x_axis_title.as_str())
        .y_axis_label(config.y_axis_title.as_str())
        .height(config.plot_height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let line = Line::new(PlotPoints::from(series.points.clone()))
                    .name(&series.name)
                    .color(series.color)
                    .width(series.style.line_width);
                plot_ui.line(line);

                let markers = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.name)
                    .color(series.color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(series.style.marker_radius);
                plot_ui.points(markers);
            }

            if let Some(note) = &chart.annotation {
                let arrow = Arrows::new(
                    PlotPoints::from(vec![note.text_at]),
                    PlotPoints::from(vec![note.at]),
                )
                .color(note.color);
                plot_ui.arrows(arrow);

                let text = RichText::new(&note.text)
                    .size(config.annotation_text_size)
                    .color(note.color);
                plot_ui.text(Text::new(PlotPoint::new(note.text_at[0], note.text_at[1]), text));
            }
        });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::{ConfigLabel, DatasetPair, MeasurementTable};
    use crate::pipeline::{Session, ViewContext};

    fn view(comparison_enabled: bool) -> PreparedView {
        let rows = |r: &[(u32, f64)]| -> Vec<ThreadTiming> {
            r.iter().map(|&(t, s)| ThreadTiming::new(t, s)).collect()
        };
        let session = Session::from_datasets(Arc::new(DatasetPair::new(
            MeasurementTable::new("MACOS-M1PRO", rows(&[(1, 10.2), (2, 5.6), (4, 3.1), (8, 3.4)])),
            MeasurementTable::new("UBUNTU-I7", rows(&[(1, 12.0), (8, 2.9)])),
        )));
        session
            .prepare(&ViewContext {
                selected_label: ConfigLabel::MacosM1Pro,
                comparison_enabled,
            })
            .unwrap()
    }

    #[test]
    fn single_chart_annotates_minimum() {
        let config = PresentationConfig::light();
        let colors = SeriesColors::from_config(&config);
        let chart = single_chart(&view(false), &config, &colors);

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 4);
        assert_eq!(chart.series[0].color, colors.color_for(ConfigLabel::MacosM1Pro));

        let note = chart.annotation.unwrap();
        assert_eq!(note.at, [4.0, 3.1]);
        assert!(note.text_at[1] > note.at[1]);
        assert_eq!(note.text, "Minimum time\n4 threads\n3.1 sec");
    }

    #[test]
    fn comparison_chart_only_when_enabled() {
        let config = PresentationConfig::light();
        let colors = SeriesColors::from_config(&config);
        assert!(comparison_chart(&view(false), &config, &colors).is_none());

        let chart = comparison_chart(&view(true), &config, &colors).unwrap();
        let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["MACOS-M1PRO", "UBUNTU-I7"]);
        assert_eq!(chart.series[1].points, vec![[1.0, 12.0], [8.0, 2.9]]);
        assert_eq!(chart.series[1].style, config.comparison);
        assert!(chart.annotation.is_none());
        assert_eq!(chart.legend_title.as_deref(), Some("OS-CPU"));
    }

    #[test]
    fn legend_title_follows_config() {
        let config = PresentationConfig {
            legend_title: "Machine".to_string(),
            ..PresentationConfig::light()
        };
        let colors = SeriesColors::from_config(&config);
        let chart = comparison_chart(&view(true), &config, &colors).unwrap();
        assert_eq!(chart.legend_title.as_deref(), Some("Machine"));
        assert!(single_chart(&view(true), &config, &colors).legend_title.is_none());
    }
}

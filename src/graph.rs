#![cfg(feature = "web")]
use crate::chart::{BLUE as SERIES_BLUE, BarChart, Chart, PieChart, Rgb, lacs_bar_chart, pie_chart};
use plotters::prelude::*;
use std::error::Error;
use std::f64::consts::PI;
use std::path::Path;

/// Canvas options shared by every chart type
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Width of the graph in pixels
    pub width: u32,

    /// Height of the graph in pixels
    pub height: u32,

    /// Caption font size in pixels
    pub caption_size: u32,
}

impl Default for GraphOptions {
    /// 640x320 canvas with an 18px caption
    fn default() -> Self {
        Self {
            width: 640,
            height: 320,
            caption_size: 18,
        }
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// Renders a chart to an SVG document
///
/// This is the main entry point for drawing dashboard charts. It dispatches on the chart
/// kind and returns the SVG markup, ready to be inlined into a page.
///
/// # Arguments
/// * `chart` - The chart model produced by a dashboard view
/// * `options` - Canvas size and caption options
///
/// # Returns
/// * A Result containing the SVG markup or an error
///
/// # Examples
/// ```
/// use cxo_dashboard::chart::{pie_chart, Chart};
/// use cxo_dashboard::graph::{render_chart, GraphOptions};
///
/// let labels = vec!["North".to_string(), "South".to_string()];
/// let pie = pie_chart("Zone wise GMV (Pie Chart)", "Zones", &labels, &[300, 100]);
///
/// match render_chart(&Chart::Pie(pie), &GraphOptions::default()) {
///     Ok(svg) => println!("Chart rendered: {} bytes", svg.len()),
///     Err(e) => eprintln!("Failed to render chart: {}", e),
/// }
/// ```
pub fn render_chart(chart: &Chart, options: &GraphOptions) -> Result<String, Box<dyn Error>> {
    match chart {
        Chart::Pie(pie) => render_pie(pie, options),
        Chart::Bar(bar) => render_bar(bar, options),
    }
}

/// Draws a pie chart with a legend of group shares
///
/// # Implementation Notes
/// * Wedges start at 12 o'clock and run counter-clockwise
/// * Wedge sizes use only positive values; a metric whose values are all zero draws an
///   empty outline with the legend still listing every group at 0.0%
/// * Legend entries use the slice color and `"<label>: <share>%"`
fn render_pie(chart: &PieChart, options: &GraphOptions) -> Result<String, Box<dyn Error>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(
            &chart.title,
            ("sans-serif", options.caption_size).into_font(),
        )?;

        let (width, height) = root.dim_in_pixel();
        let split = (width as f64 * 0.45) as i32;
        let (plot, legend) = root.split_horizontally(split);

        let (plot_w, plot_h) = plot.dim_in_pixel();
        let center = (plot_w as i32 / 2, plot_h as i32 / 2);
        let radius = (plot_w.min(plot_h) as f64 / 2.0 * 0.85).max(1.0);

        let positive_total: f64 = chart
            .slices
            .iter()
            .map(|s| s.value.max(0) as f64)
            .sum();

        if positive_total > 0.0 {
            let mut start = PI / 2.0;
            for slice in &chart.slices {
                if slice.value <= 0 {
                    continue;
                }
                let sweep = slice.value as f64 / positive_total * 2.0 * PI;
                plot.draw(&Polygon::new(
                    wedge_points(center, radius, start, sweep),
                    color(slice.color).filled(),
                ))?;
                start += sweep;
            }
        } else {
            plot.draw(&Circle::new(
                center,
                radius as i32,
                ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1),
            ))?;
        }

        // Legend: title, then one swatch and label per group
        let font = ("sans-serif", 12).into_font();
        legend.draw(&Text::new(
            chart.legend_title.clone(),
            (10, 10),
            ("sans-serif", 13).into_font(),
        ))?;
        let rows = (height as i32 - 40).max(16);
        let line = (rows / chart.slices.len().max(1) as i32).clamp(8, 18);
        for (i, slice) in chart.slices.iter().enumerate() {
            let y = 32 + i as i32 * line;
            legend.draw(&Rectangle::new(
                [(10, y), (22, y + 10)],
                color(slice.color).filled(),
            ))?;
            legend.draw(&Text::new(slice.legend_label(), (28, y), font.clone()))?;
        }

        root.present()?;
    }
    Ok(svg)
}

// Polygon approximating a wedge: the center plus points along the arc, about one per degree.
fn wedge_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.to_degrees()).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 - (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

/// Draws a bar chart with one bar per category
///
/// # Implementation Notes
/// * The x axis is segmented, one segment per category, labelled with the category text
///   rotated by 90 degrees
/// * The y axis always includes zero so negative values hang below the axis
/// * Bars whose value is missing are left as gaps
fn render_bar(chart: &BarChart, options: &GraphOptions) -> Result<String, Box<dyn Error>> {
    if chart.bars.is_empty() {
        return Err(format!("nothing to plot for '{}'", chart.title).into());
    }

    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let values: Vec<f64> = chart.bars.iter().filter_map(|b| b.value).collect();
    let min_y = values.iter().cloned().fold(0.0_f64, f64::min);
    let mut max_y = values.iter().cloned().fold(0.0_f64, f64::max);
    if max_y - min_y <= f64::EPSILON {
        max_y = min_y + 1.0;
    }
    let padding = (max_y - min_y) * 0.1;
    let y_min = if min_y < 0.0 { min_y - padding } else { 0.0 };
    let y_range = y_min..max_y + padding;
    let count = chart.bars.len() as u32;
    let bar_color = color(chart.color);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", options.caption_size).into_font())
            .margin(10)
            .x_label_area_size(80)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..count).into_segmented(), y_range)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_style(
                ("sans-serif", 11)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|v| format!("{:.1}", v))
            .x_desc(&chart.x_label)
            .y_desc(&chart.y_label)
            .draw()?;

        ctx.draw_series(chart.bars.iter().enumerate().filter_map(|(i, bar)| {
            bar.value.map(|value| {
                let i = i as u32;
                let mut rect = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
                    bar_color.filled(),
                );
                rect.set_margin(0, 0, 6, 6);
                rect
            })
        }))?;

        root.present()?;
    }
    Ok(svg)
}

/// Saves a chart as an SVG file
///
/// # Arguments
/// * `chart` - The chart to draw
/// * `options` - Canvas options
/// * `path` - File path where the graph should be saved
pub fn save_chart(
    chart: &Chart,
    options: &GraphOptions,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let svg = render_chart(chart, options)?;
    std::fs::write(path, svg)?;
    Ok(())
}

/// Creates example graphs for demonstration purposes
///
/// Generates a pie chart and a Lacs bar chart from a small sample dataset and saves them to
/// disk in the "graph_output" directory.
///
/// # Returns
/// * A vector of tuples containing graph type name and file path
pub fn create_example_graphs() -> Vec<(String, String)> {
    let mut result = Vec::new();

    // Create output directory if it doesn't exist
    let output_dir = "graph_output";
    std::fs::create_dir_all(output_dir).unwrap_or_else(|_| {
        eprintln!("Output directory already exists or couldn't be created");
    });

    let labels: Vec<String> = ["North", "South", "East", "West"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let gmv = [82_450_000, 61_300_500, 23_907_000, 45_118_250];

    let options = GraphOptions::default();

    let pie = Chart::Pie(pie_chart(
        "Zone wise GMV (Pie Chart)",
        "Zones",
        &labels,
        &gmv,
    ));
    let pie_path = format!("{}/pie_chart.svg", output_dir);
    if save_chart(&pie, &options, &pie_path).is_ok() {
        result.push(("Pie".to_string(), pie_path));
    }

    let bar = Chart::Bar(lacs_bar_chart(
        "Zone wise GMV (in Lacs)",
        "Zone",
        "GMV (Lacs)",
        &labels,
        &gmv,
        SERIES_BLUE,
    ));
    let bar_path = format!("{}/bar_chart.svg", output_dir);
    if save_chart(&bar, &options, &bar_path).is_ok() {
        result.push(("Bar".to_string(), bar_path));
    }

    result
}

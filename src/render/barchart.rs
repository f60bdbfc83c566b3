use crate::error::FigureError;
use crate::render::OutputOptions;
use crate::techniques::YearlyCounts;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

/// matplotlib default cycle colors, so the Rust figures match the ones
/// already published from the original scripts
const IMAGE_PROCESSING_COLOR: RGBColor = RGBColor(31, 119, 180);
const MACHINE_LEARNING_COLOR: RGBColor = RGBColor(255, 127, 14);
const DEEP_LEARNING_COLOR: RGBColor = RGBColor(44, 160, 44);

const BAR_MARGIN_PX: u32 = 6;

#[derive(Debug, Clone)]
pub struct BarChartStyle {
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub show_legend: bool,
}

/// Renders one stacked bar per year, segments bottom-up in the order
/// Image Processing, Machine Learning, Deep Learning, and writes the image.
///
/// Only years present in the table get a bar; there is no zero-filling of
/// gaps, so the x-axis skips missing years just like the published figure.
pub fn render_barchart(
    table: &YearlyCounts,
    style: &BarChartStyle,
    out: &OutputOptions,
) -> crate::error::Result<()> {
    if table.is_empty() {
        return Err(FigureError::EmptyInput(
            "no publications to chart".to_string(),
        ));
    }

    std::fs::create_dir_all(&out.output_dir)?;
    let path = out.output_path();
    let (width, height) = out.pixel_size();

    let drawn = match out.format {
        super::ImageFormat::Svg => draw(
            SVGBackend::new(&path, (width, height)).into_drawing_area(),
            table,
            style,
            out,
        ),
        _ => draw(
            BitMapBackend::new(&path, (width, height)).into_drawing_area(),
            table,
            style,
            out,
        ),
    };
    drawn.map_err(|e| FigureError::Render(e.to_string()))
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &YearlyCounts,
    style: &BarChartStyle,
    out: &OutputOptions,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let margin = out.margin_px();
    let root = root.margin(margin, margin, margin, margin);

    let years: Vec<i32> = table.keys().copied().collect();
    let max_total = table.values().map(|c| c.total()).max().unwrap_or(0);
    let y_max = (max_total.max(1) as f64) * 1.05;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(55);
    if let Some(title) = &out.title {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut chart = builder.build_cartesian_2d(
        (0u32..years.len() as u32).into_segmented(),
        0.0..y_max,
    )?;

    let year_labels = years.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .axis_desc_style(("sans-serif", 16))
        .x_label_formatter(&move |seg| match seg {
            SegmentValue::CenterOf(i) => year_labels
                .get(*i as usize)
                .map(|y| y.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    // Legend entries are registered up front so they list in reading order
    // rather than draw order. An empty series leaves no mark on the chart
    // itself.
    if style.show_legend {
        let no_data = || std::iter::empty::<Rectangle<(SegmentValue<u32>, f64)>>();
        if !style.legend_title.is_empty() {
            // legend title row: text with no glyph
            chart
                .draw_series(no_data())?
                .label(&style.legend_title)
                .legend(|(_, _)| PathElement::new(Vec::<(i32, i32)>::new(), TRANSPARENT));
        }
        for (label, color) in [
            ("Image Processing", IMAGE_PROCESSING_COLOR),
            ("Machine Learning", MACHINE_LEARNING_COLOR),
            ("Deep Learning", DEEP_LEARNING_COLOR),
        ] {
            chart.draw_series(no_data())?.label(label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
            });
        }
    }

    // Stacked by overdrawing: full totals first, then the lower partial
    // sums on top of them.
    let totals: Vec<f64> = table.values().map(|c| c.total() as f64).collect();
    let ip_plus_ml: Vec<f64> = table
        .values()
        .map(|c| (c.image_processing + c.machine_learning) as f64)
        .collect();
    let ip_only: Vec<f64> = table.values().map(|c| c.image_processing as f64).collect();

    for (values, color) in [
        (&totals, DEEP_LEARNING_COLOR),
        (&ip_plus_ml, MACHINE_LEARNING_COLOR),
        (&ip_only, IMAGE_PROCESSING_COLOR),
    ] {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(BAR_MARGIN_PX)
                .data(values.iter().enumerate().map(|(i, &v)| (i as u32, v))),
        )?;
    }

    if style.show_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

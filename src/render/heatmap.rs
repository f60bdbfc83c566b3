use crate::basemap::Basemap;
use crate::cmap::Colormap;
use crate::constants::COLORBAR_STEPS;
use crate::error::FigureError;
use crate::grid::DensityGrid;
use crate::render::OutputOptions;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::str::FromStr;

/// Which side of the map the colorbar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorbarLocation {
    #[default]
    Right,
    Left,
    Top,
    Bottom,
}

impl FromStr for ColorbarLocation {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, FigureError> {
        match s.to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(FigureError::Config(format!(
                "Unknown colorbar location '{s}'. Available: right, left, top, bottom"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorbarOptions {
    pub location: ColorbarLocation,
    /// bar thickness as a fraction of the figure size
    pub size: f64,
    /// gap between map and bar as a fraction of the figure size
    pub pad: f64,
    pub label: String,
    /// label rotation in degrees, snapped to the nearest quarter turn
    pub label_rotation: i32,
    /// distance between the tick labels and the bar label, in pixels
    pub label_pad: i32,
}

#[derive(Debug, Clone)]
pub struct HeatmapStyle {
    pub cmap: Colormap,
    pub edgecolor: RGBColor,
    /// boundary transparency, 1.0 = opaque
    pub alpha: f64,
    pub linewidth: f64,
    pub x_label: String,
    pub y_label: String,
    pub colorbar: ColorbarOptions,
}

/// Renders the smoothed density grid over the basemap and writes the image.
///
/// The grid is stretched to the basemap's bounding extent with north up,
/// boundaries are drawn on top, and a colorbar annotates the density scale.
pub fn render_heatmap(
    grid: &DensityGrid,
    basemap: &Basemap,
    style: &HeatmapStyle,
    out: &OutputOptions,
) -> crate::error::Result<()> {
    std::fs::create_dir_all(&out.output_dir)?;
    let path = out.output_path();
    let (width, height) = out.pixel_size();

    let drawn = match out.format {
        super::ImageFormat::Svg => draw(
            SVGBackend::new(&path, (width, height)).into_drawing_area(),
            grid,
            basemap,
            style,
            out,
        ),
        _ => draw(
            BitMapBackend::new(&path, (width, height)).into_drawing_area(),
            grid,
            basemap,
            style,
            out,
        ),
    };
    drawn.map_err(|e| FigureError::Render(e.to_string()))
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    grid: &DensityGrid,
    basemap: &Basemap,
    style: &HeatmapStyle,
    out: &OutputOptions,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let margin = out.margin_px();
    let root = root.margin(margin, margin, margin, margin);

    let (width, height) = root.dim_in_pixel();
    let (map_area, cb_area) = split_colorbar(&root, style.colorbar.location, width, height, style);

    let (minx, miny, maxx, maxy) = basemap.total_bounds();
    let (vmin, vmax) = value_span(grid);

    // Map with the density field underneath the boundaries. The cartesian
    // y-axis runs south to north, which matches the grid's row order.
    let mut builder = ChartBuilder::on(&map_area);
    builder
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(55);
    if let Some(title) = &out.title {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut chart = builder.build_cartesian_2d(minx..maxx, miny..maxy)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let (rows, cols) = grid.shape();
    let dx = (maxx - minx) / cols as f64;
    let dy = (maxy - miny) / rows as f64;
    let span = vmax - vmin;

    chart.draw_series(
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                let t = (grid.data()[(row, col)] - vmin) / span;
                let (r, g, b) = style.cmap.rgb(t);
                let x0 = minx + col as f64 * dx;
                let y0 = miny + row as f64 * dy;
                Rectangle::new(
                    [(x0, y0), (x0 + dx, y0 + dy)],
                    RGBColor(r, g, b).filled(),
                )
            }),
    )?;

    let edge = RGBAColor(
        style.edgecolor.0,
        style.edgecolor.1,
        style.edgecolor.2,
        style.alpha,
    );
    let stroke = ShapeStyle::from(&edge).stroke_width(style.linewidth.round().max(1.0) as u32);
    for ring in basemap.rings() {
        chart.draw_series(LineSeries::new(ring.iter().copied(), stroke))?;
    }

    draw_colorbar(&cb_area, style, vmin, vmax)?;

    root.present()?;
    Ok(())
}

/// Splits the figure into the map area and a strip for the colorbar,
/// including room for its tick labels.
fn split_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    location: ColorbarLocation,
    width: u32,
    height: u32,
    style: &HeatmapStyle,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    const TICK_LABEL_PX: u32 = 60;

    match location {
        ColorbarLocation::Right => {
            let strip = colorbar_strip(width, style) + TICK_LABEL_PX;
            let (map, cb) = root.split_horizontally(width.saturating_sub(strip));
            (map, cb)
        }
        ColorbarLocation::Left => {
            let strip = colorbar_strip(width, style) + TICK_LABEL_PX;
            let (cb, map) = root.split_horizontally(strip);
            (map, cb)
        }
        ColorbarLocation::Top => {
            let strip = colorbar_strip(height, style) + TICK_LABEL_PX / 2;
            let (cb, map) = root.split_vertically(strip);
            (map, cb)
        }
        ColorbarLocation::Bottom => {
            let strip = colorbar_strip(height, style) + TICK_LABEL_PX / 2;
            let (map, cb) = root.split_vertically(height.saturating_sub(strip));
            (map, cb)
        }
    }
}

fn colorbar_strip(figure_extent: u32, style: &HeatmapStyle) -> u32 {
    let fraction = style.colorbar.size + style.colorbar.pad;
    ((figure_extent as f64) * fraction).round().max(8.0) as u32
}

/// Gradient strip drawn as stacked filled rectangles, with the value axis
/// alongside and the label drawn rotated next to it.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &HeatmapStyle,
    vmin: f64,
    vmax: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let cb = &style.colorbar;
    let vertical = matches!(
        cb.location,
        ColorbarLocation::Right | ColorbarLocation::Left
    );

    let mut builder = ChartBuilder::on(area);
    let mut chart = if vertical {
        builder
            .margin_top(10)
            .margin_bottom(50)
            .set_label_area_size(LabelAreaPosition::Right, 42)
            .build_cartesian_2d(0.0..1.0, vmin..vmax)?
    } else {
        builder
            .margin_left(60)
            .margin_right(60)
            .set_label_area_size(LabelAreaPosition::Bottom, 24)
            .build_cartesian_2d(vmin..vmax, 0.0..1.0)?
    };

    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    for i in 0..COLORBAR_STEPS {
        let t = i as f64 / (COLORBAR_STEPS - 1) as f64;
        let (r, g, b) = style.cmap.rgb(t);
        let v0 = vmin + i as f64 * step;
        let rect = if vertical {
            Rectangle::new([(0.0, v0), (1.0, v0 + step)], RGBColor(r, g, b).filled())
        } else {
            Rectangle::new([(v0, 0.0), (v0 + step, 1.0)], RGBColor(r, g, b).filled())
        };
        chart.draw_series(std::iter::once(rect))?;
    }

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh().disable_y_mesh();
    if vertical {
        mesh.disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v| format!("{v:.2}"));
    } else {
        mesh.disable_y_axis()
            .x_labels(6)
            .x_label_formatter(&|v| format!("{v:.2}"));
    }
    mesh.draw()?;

    if !cb.label.is_empty() {
        let font = ("sans-serif", 16)
            .into_font()
            .transform(quarter_turn(cb.label_rotation));
        let text_style = TextStyle::from(font)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (w, h) = area.dim_in_pixel();
        let pad = cb.label_pad.max(0);
        let pos = if vertical {
            (w as i32 - pad.min(w as i32 - 4), h as i32 / 2)
        } else {
            (w as i32 / 2, h as i32 - pad.min(h as i32 - 4))
        };
        area.draw(&Text::new(cb.label.clone(), pos, text_style))?;
    }

    Ok(())
}

/// Value range of the grid, widened when degenerate so normalization and
/// the colorbar axis never divide by zero.
fn value_span(grid: &DensityGrid) -> (f64, f64) {
    let (vmin, vmax) = grid.value_range();
    if vmax - vmin > f64::EPSILON {
        (vmin, vmax)
    } else {
        (vmin, vmin + 1.0)
    }
}

fn quarter_turn(degrees: i32) -> FontTransform {
    match degrees.rem_euclid(360) {
        45..=134 => FontTransform::Rotate90,
        135..=224 => FontTransform::Rotate180,
        225..=314 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

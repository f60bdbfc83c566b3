use benthic_figures::cmap::Colormap;
use benthic_figures::constants::SUPPORTED_CRS;
use benthic_figures::error::FigureError;
use benthic_figures::render::{
    ColorbarLocation, ColorbarOptions, HeatmapStyle, ImageFormat, OutputOptions, parse_color,
    parse_fraction, render_heatmap,
};
use benthic_figures::smoothing::BoundaryMode;
use benthic_figures::{Basemap, DensityGrid, read_coordinates_csv};

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Generate a heatmap of the geographic origin of the image data used to
/// train the reviewed automated benthic image analysis systems.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input CSV file containing the latitude and longitude data
    input: PathBuf,

    /// Directory for saving the output image file
    output: PathBuf,

    /// Transparency of the world map boundaries
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Number of bins in the heatmap (longitude, latitude)
    #[arg(long, num_args = 2, value_names = ["NX", "NY"], default_values_t = [100, 100])]
    bins: Vec<usize>,

    /// Colormap to use for the heatmap
    #[arg(long, default_value = "jet")]
    cmap: String,

    /// Label for the colorbar
    #[arg(long, default_value = "Log Frequency")]
    colour_bar_label: String,

    /// Location of the colorbar (right, left, top, bottom)
    #[arg(long, default_value = "right")]
    colour_bar_location: String,

    /// Padding between map and colorbar, as a fraction of the figure
    #[arg(long, default_value_t = 0.05)]
    colour_bar_pad: f64,

    /// Size of the colorbar, e.g. "2%"
    #[arg(long, default_value = "2%")]
    colour_bar_size: String,

    /// Coordinate reference system of the input data
    #[arg(long, default_value = "epsg:4326")]
    crs: String,

    /// DPI of the output image file
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Edge color of the world map boundaries
    #[arg(long, default_value = "grey")]
    edgecolor: String,

    /// Size of the output image in inches
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [10.0, 6.0])]
    fig_size: Vec<f64>,

    /// Name of the output image file
    #[arg(long, default_value = "heatmap")]
    filename: String,

    /// Format of the output image file (png, jpeg, bmp, svg)
    #[arg(long, default_value = "png")]
    format: String,

    /// Padding of the colorbar label in pixels
    #[arg(long, default_value_t = 15)]
    label_pad: i32,

    /// Rotation of the colorbar label in degrees
    #[arg(long, default_value_t = 270)]
    label_rotation: i32,

    /// Width of the world map boundary lines
    #[arg(long, default_value_t = 0.75)]
    linewidth: f64,

    /// Basemap to draw: "builtin" or a path to a GeoJSON file
    #[arg(long, default_value = "builtin")]
    map: String,

    /// Boundary mode of the smoothing filter
    #[arg(long, default_value = "nearest")]
    mode: String,

    /// Whitespace around the figure in inches
    #[arg(long, default_value_t = 0.1)]
    pad_inches: f64,

    /// Amount of Gaussian smoothing to apply to the heatmap
    #[arg(long, default_value_t = 1.3)]
    smoothing: f64,

    /// Title of the figure
    #[arg(long)]
    title: Option<String>,

    /// Label for the x-axis
    #[arg(long, default_value = "Longitude")]
    x_label: String,

    /// Label for the y-axis
    #[arg(long, default_value = "Latitude")]
    y_label: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.crs.eq_ignore_ascii_case(SUPPORTED_CRS) {
        return Err(FigureError::Config(format!(
            "Unsupported CRS '{}': coordinates and the basemap are {SUPPORTED_CRS}",
            args.crs
        ))
        .into());
    }

    let cmap: Colormap = args.cmap.parse()?;
    let mode: BoundaryMode = args.mode.parse()?;
    let format: ImageFormat = args.format.parse()?;
    let location: ColorbarLocation = args.colour_bar_location.parse()?;
    let colour_bar_size = parse_fraction(&args.colour_bar_size)?;
    let edgecolor = parse_color(&args.edgecolor)?;

    let coords = read_coordinates_csv(&args.input)?;
    info!(
        "Loaded {} coordinate rows from {}",
        coords.len(),
        args.input.display()
    );

    let basemap = if args.map == "builtin" {
        Basemap::builtin()?
    } else {
        Basemap::from_file(&args.map)?
    };
    info!("Basemap has {} boundary rings", basemap.rings().len());

    let grid = DensityGrid::histogram(&coords, args.bins[0], args.bins[1])?
        .log_density()
        .smooth(args.smoothing, mode);

    let style = HeatmapStyle {
        cmap,
        edgecolor,
        alpha: args.alpha,
        linewidth: args.linewidth,
        x_label: args.x_label,
        y_label: args.y_label,
        colorbar: ColorbarOptions {
            location,
            size: colour_bar_size,
            pad: args.colour_bar_pad,
            label: args.colour_bar_label,
            label_rotation: args.label_rotation,
            label_pad: args.label_pad,
        },
    };
    let out = OutputOptions {
        output_dir: args.output,
        filename: args.filename,
        format,
        fig_size: (args.fig_size[0], args.fig_size[1]),
        dpi: args.dpi,
        pad_inches: args.pad_inches,
        title: args.title,
    };

    render_heatmap(&grid, &basemap, &style, &out)?;
    info!("Heatmap saved to {}", out.output_path().display());

    Ok(())
}

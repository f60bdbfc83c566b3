use benthic_figures::render::{
    BarChartStyle, ImageFormat, OutputOptions, render_barchart,
};
use benthic_figures::techniques::{aggregate_by_year, filter_after_year, percentages};
use benthic_figures::read_publications_csv;

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Generate a stacked bar chart showing the progression of computer
/// vision-based benthic biodiversity monitoring literature over time,
/// subdivided by the techniques utilised.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input CSV file containing the publication data
    input: PathBuf,

    /// Directory for saving the output image file
    output: PathBuf,

    /// Only chart and summarize publications from this year onwards
    #[arg(long)]
    after_year_only: Option<i32>,

    /// DPI of the output image file
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Size of the output image in inches
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [10.0, 5.0])]
    fig_size: Vec<f64>,

    /// Name of the output image file
    #[arg(long, default_value = "techniques")]
    filename: String,

    /// Format of the output image file (png, jpeg, bmp, svg)
    #[arg(long, default_value = "png")]
    format: String,

    /// Title of the legend
    #[arg(long, default_value = "Techniques")]
    legend_title: String,

    /// Do not print statistics about the techniques used
    #[arg(long)]
    no_print_stats: bool,

    /// Do not show the legend on the plot
    #[arg(long)]
    no_show_legend: bool,

    /// Whitespace around the figure in inches
    #[arg(long, default_value_t = 0.1)]
    pad_inches: f64,

    /// Title of the plot
    #[arg(long)]
    title: Option<String>,

    /// Label for the x-axis
    #[arg(long, default_value = "Year")]
    xlabel: String,

    /// Label for the y-axis
    #[arg(long, default_value = "Number of Papers")]
    ylabel: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let format: ImageFormat = args.format.parse()?;

    let publications = read_publications_csv(&args.input)?;
    info!(
        "Loaded {} publication rows from {}",
        publications.len(),
        args.input.display()
    );

    let mut table = aggregate_by_year(&publications);
    if let Some(year) = args.after_year_only {
        table = filter_after_year(&table, year);
    }
    info!("Aggregated into {} publication years", table.len());

    let style = BarChartStyle {
        x_label: args.xlabel,
        y_label: args.ylabel,
        legend_title: args.legend_title,
        show_legend: !args.no_show_legend,
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

    render_barchart(&table, &style, &out)?;
    info!("Bar chart saved to {}", out.output_path().display());

    if !args.no_print_stats {
        if let Some(year) = args.after_year_only {
            println!("Stats after {year}:");
        }
        let shares = percentages(&table);
        println!(
            "Percentage of papers that used Image Processing: {}",
            shares.image_processing
        );
        println!(
            "Percentage of papers that used Machine Learning: {}",
            shares.machine_learning
        );
        println!(
            "Percentage of papers that used Deep Learning: {}",
            shares.deep_learning
        );
    }

    Ok(())
}

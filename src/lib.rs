pub mod basemap;
pub mod cmap;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod grid;
pub mod render;
pub mod smoothing;
pub mod techniques;

pub use basemap::Basemap;
pub use cmap::Colormap;
pub use constants::{LATITUDE_HEADER, LONGITUDE_HEADER, SUPPORTED_CRS, YEAR_HEADER};
pub use csv_reader::{Coordinate, Publication, read_coordinates_csv, read_publications_csv};
pub use error::{FigureError, Result};
pub use grid::DensityGrid;
pub use smoothing::BoundaryMode;
pub use techniques::{TechniqueCounts, YearlyCounts, aggregate_by_year, percentages};

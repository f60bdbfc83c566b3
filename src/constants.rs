/// Expected headers in the lat/long CSV
pub const LATITUDE_HEADER: &str = "Latitude_rounded";
pub const LONGITUDE_HEADER: &str = "Longitude_rounded";

/// Expected headers in the techniques CSV
pub const YEAR_HEADER: &str = "Year";
pub const IMAGE_PROCESSING_HEADER: &str = "Image_Processing";
pub const MACHINE_LEARNING_HEADER: &str = "Machine_Learning";
pub const DEEP_LEARNING_HEADER: &str = "Deep_Learning";

/// Gaussian kernel is cut off at this many standard deviations
pub const KERNEL_TRUNCATE: f64 = 4.0;

/// Gradient resolution of the rendered colorbar
pub const COLORBAR_STEPS: usize = 100;

/// Coordinate reference system the built-in basemap and input CSVs use
pub const SUPPORTED_CRS: &str = "epsg:4326";

use crate::constants::{
    DEEP_LEARNING_HEADER, IMAGE_PROCESSING_HEADER, LATITUDE_HEADER, LONGITUDE_HEADER,
    MACHINE_LEARNING_HEADER, YEAR_HEADER,
};
use crate::error::{FigureError, Result};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// One sampled image location from the literature lat/long CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One reviewed publication with its technique indicators.
///
/// Categories are non-exclusive: a publication using several techniques
/// carries a non-zero count in each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub year: i32,
    pub image_processing: u64,
    pub machine_learning: u64,
    pub deep_learning: u64,
}

/// Reads the lat/long CSV used for the heatmap figure.
///
/// # Errors
/// Returns error if the file cannot be read, required columns are missing,
/// or a coordinate cell fails to parse.
pub fn read_coordinates_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Coordinate>> {
    let file = std::fs::File::open(path)?;
    read_coordinates_from_reader(file)
}

/// Read a CSV with `Latitude_rounded` and `Longitude_rounded` columns.
/// - Column order is free and extra columns are tolerated
/// - Fully blank rows are skipped
pub fn read_coordinates_from_reader<R: Read>(reader: R) -> Result<Vec<Coordinate>> {
    let mut rdr = csv_reader(reader);

    let headers = rdr.headers()?.clone();
    let lat_idx = find_column(&headers, LATITUDE_HEADER)?;
    let lon_idx = find_column(&headers, LONGITUDE_HEADER)?;

    let mut coords = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if is_blank(&rec) {
            continue;
        }

        let latitude = parse_float(&rec, lat_idx, LATITUDE_HEADER, row)?;
        let longitude = parse_float(&rec, lon_idx, LONGITUDE_HEADER, row)?;
        coords.push(Coordinate {
            latitude,
            longitude,
        });
    }

    Ok(coords)
}

/// Reads the techniques CSV used for the stacked bar chart figure.
///
/// # Errors
/// Returns error if the file cannot be read, required columns are missing,
/// or a year/indicator cell fails to parse.
pub fn read_publications_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Publication>> {
    let file = std::fs::File::open(path)?;
    read_publications_from_reader(file)
}

/// Read a CSV with `Year`, `Image_Processing`, `Machine_Learning` and
/// `Deep_Learning` columns.
pub fn read_publications_from_reader<R: Read>(reader: R) -> Result<Vec<Publication>> {
    let mut rdr = csv_reader(reader);

    let headers = rdr.headers()?.clone();
    let year_idx = find_column(&headers, YEAR_HEADER)?;
    let ip_idx = find_column(&headers, IMAGE_PROCESSING_HEADER)?;
    let ml_idx = find_column(&headers, MACHINE_LEARNING_HEADER)?;
    let dl_idx = find_column(&headers, DEEP_LEARNING_HEADER)?;

    let mut publications = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2;

        if is_blank(&rec) {
            continue;
        }

        publications.push(Publication {
            year: parse_int::<i32>(&rec, year_idx, YEAR_HEADER, row)?,
            image_processing: parse_int::<u64>(&rec, ip_idx, IMAGE_PROCESSING_HEADER, row)?,
            machine_learning: parse_int::<u64>(&rec, ml_idx, MACHINE_LEARNING_HEADER, row)?,
            deep_learning: parse_int::<u64>(&rec, dl_idx, DEEP_LEARNING_HEADER, row)?,
        });
    }

    Ok(publications)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional columns
        .from_reader(reader)
}

/// Locates a required column by name (case-insensitive)
fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| FigureError::CsvHeader(format!("Missing required column '{name}'")))
}

fn is_blank(rec: &StringRecord) -> bool {
    rec.iter().all(|f| f.trim().is_empty())
}

/// Safely extracts a cell from a CSV record
fn get_cell<'a>(rec: &'a StringRecord, idx: usize, row: usize) -> Result<&'a str> {
    rec.get(idx)
        .map(str::trim)
        .ok_or_else(|| FigureError::CsvRow {
            row,
            expected: idx + 1,
            got: rec.len(),
        })
}

fn parse_float(rec: &StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let value = get_cell(rec, idx, row)?;
    value.parse().map_err(|source| FigureError::FloatField {
        row,
        column: column.to_string(),
        value: value.to_string(),
        source,
    })
}

fn parse_int<T>(rec: &StringRecord, idx: usize, column: &str, row: usize) -> Result<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let value = get_cell(rec, idx, row)?;
    value.parse().map_err(|source| FigureError::IntField {
        row,
        column: column.to_string(),
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_coordinates_basic() {
        let data = "Latitude_rounded,Longitude_rounded\n-54.5,-36.5\n51.0,-1.5\n";
        let coords = read_coordinates_from_reader(data.as_bytes()).unwrap();

        assert_eq!(coords.len(), 2);
        assert_eq!(
            coords[0],
            Coordinate {
                latitude: -54.5,
                longitude: -36.5
            }
        );
        assert_eq!(coords[1].longitude, -1.5);
    }

    #[test]
    fn test_read_coordinates_extra_columns_and_order() {
        // Column order is free, extra columns are ignored
        let data = "Paper,Longitude_rounded,Latitude_rounded\nTrotter2025,170.5,-45.9\n";
        let coords = read_coordinates_from_reader(data.as_bytes()).unwrap();

        assert_eq!(coords.len(), 1);
        assert_eq!(coords[0].latitude, -45.9);
        assert_eq!(coords[0].longitude, 170.5);
    }

    #[test]
    fn test_read_coordinates_missing_column() {
        let data = "Latitude_rounded,Longitude\n1.0,2.0\n";
        let err = read_coordinates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FigureError::CsvHeader(_)));
    }

    #[test]
    fn test_read_coordinates_bad_value() {
        let data = "Latitude_rounded,Longitude_rounded\n12.0,east\n";
        let err = read_coordinates_from_reader(data.as_bytes()).unwrap_err();
        match err {
            FigureError::FloatField { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, LONGITUDE_HEADER);
                assert_eq!(value, "east");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_coordinates_skips_blank_rows() {
        let data = "Latitude_rounded,Longitude_rounded\n1.0,2.0\n,\n3.0,4.0\n";
        let coords = read_coordinates_from_reader(data.as_bytes()).unwrap();
        assert_eq!(coords.len(), 2);
    }

    #[test]
    fn test_read_publications_basic() {
        let data = "Year,Image_Processing,Machine_Learning,Deep_Learning\n\
                    2020,1,0,1\n\
                    2021,0,1,1\n";
        let pubs = read_publications_from_reader(data.as_bytes()).unwrap();

        assert_eq!(pubs.len(), 2);
        assert_eq!(
            pubs[0],
            Publication {
                year: 2020,
                image_processing: 1,
                machine_learning: 0,
                deep_learning: 1,
            }
        );
        assert_eq!(pubs[1].year, 2021);
    }

    #[test]
    fn test_read_publications_missing_column() {
        let data = "Year,Image_Processing,Machine_Learning\n2020,1,0\n";
        let err = read_publications_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FigureError::CsvHeader(_)));
    }

    #[test]
    fn test_read_publications_bad_count() {
        let data = "Year,Image_Processing,Machine_Learning,Deep_Learning\n2020,1,-1,0\n";
        let err = read_publications_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FigureError::IntField { row: 2, .. }));
    }

    #[test]
    fn test_read_coordinates_csv_from_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lat_longs.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Latitude_rounded,Longitude_rounded").unwrap();
        writeln!(file, "10.5,-20.5").unwrap();

        let coords = read_coordinates_csv(&path).unwrap();
        assert_eq!(coords.len(), 1);
        assert_eq!(coords[0].latitude, 10.5);
    }
}

use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DataSettings;
use crate::core::DatasetStore;
use crate::models::{IncomeEntry, Listing, TransitStop};

/// Errors that can occur while loading the datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open {path}: {source}")]
    OpenError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Income table is empty")]
    EmptyIncomeTable,
}

fn read_rows<T, R>(reader: R) -> Result<Vec<T>, DatasetError>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Parse listings CSV, rejecting rows with a non-positive or non-finite price
pub fn read_listings<R: io::Read>(reader: R) -> Result<Vec<Listing>, DatasetError> {
    let listings: Vec<Listing> = read_rows(reader)?;

    for (idx, listing) in listings.iter().enumerate() {
        if !(listing.price.is_finite() && listing.price > 0.0) {
            return Err(DatasetError::InvalidRow {
                row: idx + 1,
                reason: format!("price must be positive, got {}", listing.price),
            });
        }
    }

    Ok(listings)
}

/// Parse income CSV; the table must not be empty
pub fn read_incomes<R: io::Read>(reader: R) -> Result<Vec<IncomeEntry>, DatasetError> {
    let incomes: Vec<IncomeEntry> = read_rows(reader)?;
    if incomes.is_empty() {
        return Err(DatasetError::EmptyIncomeTable);
    }
    Ok(incomes)
}

/// Parse transit stops CSV
pub fn read_stops<R: io::Read>(reader: R) -> Result<Vec<TransitStop>, DatasetError> {
    read_rows(reader)
}

fn open(path: &Path) -> Result<std::fs::File, DatasetError> {
    std::fs::File::open(path).map_err(|e| DatasetError::OpenError {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })
}

/// Load all three datasets from the configured directory
pub fn load_store(settings: &DataSettings) -> Result<DatasetStore, DatasetError> {
    let dir = Path::new(&settings.dir);

    let listings = read_listings(open(&dir.join(&settings.listings_file))?)?;
    let incomes = read_incomes(open(&dir.join(&settings.income_file))?)?;
    let stops = read_stops(open(&dir.join(&settings.transport_file))?)?;

    if stops.is_empty() {
        tracing::warn!("Transit dataset is empty; suggestion requests will fail");
    }

    tracing::info!(
        "Loaded {} listings, {} professions, {} transit stops from {}",
        listings.len(),
        incomes.len(),
        stops.len(),
        dir.display()
    );

    Ok(DatasetStore::new(listings, incomes, stops))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS: &str = "\
location,latitude,longitude,price,property_type,bedrooms,school,park,supermarket,furnished,pet_friendly,new_listing,family_friendly
Dubai Marina,25.0805,55.1403,150000,Apartment,2,1,1,0,1,0,0,1
Deira, 25.2711,55.3075,60000,Studio,0,0,0,1,0,1,1,0
";

    #[test]
    fn test_read_listings() {
        let listings = read_listings(LISTINGS.as_bytes()).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].location, "Dubai Marina");
        assert!(listings[0].school);
        assert!(!listings[0].supermarket);
        assert_eq!(listings[1].latitude, 25.2711);
        assert_eq!(listings[1].bedrooms, 0);
        assert!(listings[1].new_listing);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let csv = "\
location,latitude,longitude,price,property_type,bedrooms,school,park,supermarket,furnished,pet_friendly,new_listing,family_friendly
Nowhere,0,0,0,Villa,3,0,0,0,0,0,0,0
";
        assert!(matches!(
            read_listings(csv.as_bytes()),
            Err(DatasetError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_read_incomes() {
        let incomes = read_incomes("profession,avg_income\nTeacher,50000\nEngineer,70000\n".as_bytes()).unwrap();
        assert_eq!(incomes.len(), 2);
        assert_eq!(incomes[1].avg_income, 70000.0);

        assert!(matches!(
            read_incomes("profession,avg_income\n".as_bytes()),
            Err(DatasetError::EmptyIncomeTable)
        ));
    }

    #[test]
    fn test_read_stops() {
        let stops = read_stops("stop_name,latitude,longitude\nUnion,25.2663,55.3143\n".as_bytes()).unwrap();
        assert_eq!(stops[0].stop_name, "Union");
    }

    #[test]
    fn test_missing_file() {
        let settings = DataSettings {
            dir: "/nonexistent".to_string(),
            ..Default::default()
        };
        assert!(matches!(load_store(&settings), Err(DatasetError::OpenError { .. })));
    }
}

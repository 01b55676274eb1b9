//! Loads the energy dataset into memory.
//!
//! The dataset is a table with one row per (country, year). Rows are kept in
//! file order, which matters for tie-breaking in rankings and for the
//! choropleth's point indices. Both CSV and Parquet inputs are accepted and
//! decoded through arrow record batches.

use crate::error::Error;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::compute::cast;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use ringlog::*;

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

mod record;

pub use record::{EnergyRecord, Metric};

const COUNTRY: &str = "country";
const YEAR: &str = "year";

/// Batch size used when decoding record batches.
const BATCH_SIZE: usize = 8192;

/// Immutable, in-memory table of energy records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EnergyRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<EnergyRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a `.csv` or `.parquet` file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let batches = match ext.as_str() {
            "csv" => read_csv(path)?,
            "parquet" => read_parquet(path)?,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "`{}` (expected .csv or .parquet)",
                    if other.is_empty() { "<none>" } else { other }
                )))
            }
        };

        let mut records = Vec::new();
        for batch in &batches {
            records.extend(decode_batch(batch)?);
        }

        info!(
            "loaded {} records from {}",
            records.len(),
            path.display()
        );

        Ok(Self { records })
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years in order of first appearance.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for record in &self.records {
            if !years.contains(&record.year) {
                years.push(record.year);
            }
        }
        years
    }

    /// All rows for a single country, in dataset order.
    pub fn country(&self, name: &str) -> impl Iterator<Item = &EnergyRecord> {
        let name = name.to_string();
        self.records.iter().filter(move |r| r.country == name)
    }
}

fn read_csv(path: &Path) -> Result<Vec<RecordBatch>, Error> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);

    // the real file has well over a hundred columns; infer the header, then
    // pin the types of the columns we read and leave everything else as text
    let (inferred, _) = format.infer_schema(&mut file, Some(100))?;
    file.seek(SeekFrom::Start(0))?;

    let mut projection = Vec::new();
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let name = field.name().as_str();
            let data_type = if name == COUNTRY {
                projection.push(idx);
                DataType::Utf8
            } else if name == YEAR {
                projection.push(idx);
                DataType::Int32
            } else if Metric::from_column(name).is_some() {
                projection.push(idx);
                DataType::Float64
            } else {
                DataType::Utf8
            };
            Field::new(name, data_type, true)
        })
        .collect();

    let reader = arrow::csv::ReaderBuilder::new(Arc::new(Schema::new(fields)))
        .with_format(format)
        .with_batch_size(BATCH_SIZE)
        .with_projection(projection)
        .build(file)?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, Error> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(BATCH_SIZE)
        .build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

fn column(batch: &RecordBatch, name: &str, data_type: &DataType) -> Result<ArrayRef, Error> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
    Ok(cast(column, data_type)?)
}

fn decode_batch(batch: &RecordBatch) -> Result<Vec<EnergyRecord>, Error> {
    let countries = column(batch, COUNTRY, &DataType::Utf8)?;
    let countries = countries
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::MissingColumn(COUNTRY.to_string()))?;

    let years = column(batch, YEAR, &DataType::Int32)?;
    let years = years
        .as_any()
        .downcast_ref::<Int32Array>()
        .ok_or_else(|| Error::MissingColumn(YEAR.to_string()))?;

    let mut metrics = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        metrics.push(column(batch, metric.column(), &DataType::Float64)?);
    }
    let metrics: Vec<&Float64Array> = metrics
        .iter()
        .zip(Metric::ALL)
        .map(|(array, metric)| {
            array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| Error::MissingColumn(metric.column().to_string()))
        })
        .collect::<Result<_, _>>()?;

    let value = |idx: usize, row: usize| -> Option<f64> {
        let array = metrics[idx];
        if array.is_null(row) {
            None
        } else {
            Some(array.value(row))
        }
    };

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        if countries.is_null(row) || years.is_null(row) {
            warn!("skipping row {row}: missing country or year");
            continue;
        }

        let mut record = EnergyRecord::new(countries.value(row), years.value(row));
        for (idx, metric) in Metric::ALL.iter().enumerate() {
            record.set(*metric, value(idx, row));
        }
        records.push(record);
    }

    debug!("decoded {} rows from batch", records.len());

    Ok(records)
}

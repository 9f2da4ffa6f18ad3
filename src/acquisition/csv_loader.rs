//! CSV ingestion for the five fleet exports.
//!
//! Every file has one header row, which is skipped; columns are read by
//! position. A malformed row is skipped and counted, never fatal. Only
//! file-level faults (missing file, broken CSV framing) surface as
//! `IngestError`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use super::dates::parse_mdy;
use crate::config::DataConfig;
use crate::types::{
    CoatingRecord, ConsumptionRecord, DockingRecord, FleetDataset, NavigationEvent, ShipDetail,
};

/// File-level ingestion failure.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Why a single row was skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("missing required column '{0}'")]
    MissingField(&'static str),

    #[error("invalid date '{value}' in column '{field}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid number '{value}' in column '{field}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Rows kept and skipped while reading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub skipped: usize,
}

// ============================================================================
// Column helpers
// ============================================================================

fn column(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn required(record: &StringRecord, index: usize, field: &'static str) -> Result<String, RowError> {
    let value = column(record, index).trim();
    if value.is_empty() {
        Err(RowError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

fn required_date(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<chrono::NaiveDate, RowError> {
    let raw = required(record, index, field)?;
    parse_mdy(&raw).ok_or(RowError::InvalidDate { field, value: raw })
}

fn optional_number(record: &StringRecord, index: usize) -> Option<f64> {
    column(record, index)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ============================================================================
// Row conversions
// ============================================================================

impl TryFrom<&StringRecord> for NavigationEvent {
    type Error = RowError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        let text = |i: usize| column(record, i).to_string();
        Ok(Self {
            session_id: required(record, 0, "sessionId")?,
            vessel_name: text(1),
            class: text(2),
            event_name: text(3),
            start_gmt: text(4),
            end_gmt: text(5),
            duration: text(6),
            distance: text(7),
            aft_draft: text(8),
            fwd_draft: text(9),
            mid_draft: text(10),
            trim: text(11),
            displacement: text(12),
            beaufort_scale: text(13),
            sea_condition: text(14),
            beaufort_scale_desc: text(15),
            sea_condition_desc: text(16),
            speed: text(17),
            speed_gps: text(18),
            port: text(19),
            latitude: text(20),
            longitude: text(21),
        })
    }
}

impl TryFrom<&StringRecord> for ConsumptionRecord {
    type Error = RowError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            session_id: required(record, 0, "SESSION_ID")?,
            consumed_quantity: column(record, 1).to_string(),
            description: column(record, 2).to_string(),
        })
    }
}

impl TryFrom<&StringRecord> for DockingRecord {
    type Error = RowError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            vessel_name: required(record, 0, "Navio")?,
            docking_date: required_date(record, 1, "Docagem")?,
            docking_type: column(record, 2).trim().to_string(),
        })
    }
}

impl TryFrom<&StringRecord> for CoatingRecord {
    type Error = RowError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        let vessel_name = required(record, 1, "Nome do navio")?;
        let application_date = required_date(record, 5, "Data da aplicacao")?;
        let period_raw = required(record, 6, "Periodo base")?;
        let base_period_weeks = period_raw.parse::<u32>().map_err(|_| RowError::InvalidNumber {
            field: "Periodo base",
            value: period_raw.clone(),
        })?;
        Ok(Self {
            code: column(record, 0).trim().to_string(),
            vessel_name,
            class_type: column(record, 2).trim().to_string(),
            cargo_type: column(record, 3).trim().to_string(),
            class_number: column(record, 4).trim().to_string(),
            application_date,
            base_period_weeks,
            max_accumulated_stoppage: column(record, 7).trim().parse().ok(),
        })
    }
}

impl TryFrom<&StringRecord> for ShipDetail {
    type Error = RowError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        let vessel_name = required(record, 0, "Nome do navio")?;
        let dwt_raw = column(record, 3).trim();
        let deadweight_tonnage = dwt_raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RowError::InvalidNumber {
                field: "Porte Bruto",
                value: dwt_raw.to_string(),
            })?;
        Ok(Self {
            vessel_name,
            class: column(record, 1).trim().to_string(),
            cargo_type: column(record, 2).trim().to_string(),
            deadweight_tonnage,
            length_m: optional_number(record, 4),
            beam_m: optional_number(record, 5),
            draft_m: optional_number(record, 6),
            depth_m: optional_number(record, 7),
        })
    }
}

// ============================================================================
// Readers
// ============================================================================

/// Read every data row of a CSV stream, converting with `T::try_from`.
///
/// `label` only names the source in errors and logs.
pub fn read_rows<T, R>(reader: R, label: &Path) -> Result<(Vec<T>, LoadStats), IngestError>
where
    R: Read,
    T: for<'a> TryFrom<&'a StringRecord, Error = RowError>,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut stats = LoadStats::default();

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            // the reader is already past the record; only framing errors stop the file
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                stats.skipped += 1;
                debug!(file = %label.display(), line = line + 2, error = %e, "Skipping non-UTF-8 row");
                continue;
            }
            Err(source) => {
                return Err(IngestError::CsvParse {
                    path: label.to_path_buf(),
                    source,
                })
            }
        };
        match T::try_from(&record) {
            Ok(row) => {
                rows.push(row);
                stats.rows += 1;
            }
            Err(e) => {
                stats.skipped += 1;
                debug!(file = %label.display(), line = line + 2, error = %e, "Skipping row");
            }
        }
    }

    Ok((rows, stats))
}

/// Open `path` and read it with [`read_rows`].
pub fn load_file<T>(path: &Path) -> Result<Vec<T>, IngestError>
where
    T: for<'a> TryFrom<&'a StringRecord, Error = RowError>,
{
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (rows, stats) = read_rows(file, path)?;
    info!(
        file = %path.display(),
        rows = stats.rows,
        skipped = stats.skipped,
        "Loaded CSV"
    );
    Ok(rows)
}

/// Load all five exports named in `data`.
pub fn load_dataset(data: &DataConfig) -> Result<FleetDataset, IngestError> {
    Ok(FleetDataset {
        ship_details: load_file(&data.path_of(&data.ship_details_file))?,
        dockings: load_file(&data.path_of(&data.docking_file))?,
        coatings: load_file(&data.path_of(&data.coating_file))?,
        consumption: load_file(&data.path_of(&data.consumption_file))?,
        events: load_file(&data.path_of(&data.events_file))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse<T>(csv: &str) -> (Vec<T>, LoadStats)
    where
        T: for<'a> TryFrom<&'a StringRecord, Error = RowError>,
    {
        read_rows(csv.as_bytes(), Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn docking_rows_parse_and_skip_bad_dates() {
        let (rows, stats) = parse::<DockingRecord>(
            "Navio,Docagem,Tipo\n\
             Cartola,6/30/2023,Docagem\n\
             Cartola,31/12/2023,Docagem\n\
             ,1/2/2024,Docagem\n",
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(rows[0].docking_date, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
    }

    #[test]
    fn non_utf8_row_is_skipped_not_fatal() {
        let bytes: &[u8] =
            b"Navio,Docagem,Tipo\nCartola,6/30/2023,DD\nC\xe1rtola,7/1/2024,DD\nLobato,1/2/2024,DD\n";
        let (rows, stats) = read_rows::<DockingRecord, _>(bytes, Path::new("latin1.csv")).unwrap();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(rows[0].vessel_name, "Cartola");
        assert_eq!(rows[1].vessel_name, "Lobato");
    }

    #[test]
    fn coating_requires_integer_period() {
        let (rows, stats) = parse::<CoatingRecord>(
            "Sigla,Nome do navio,TipoClass,TipoCarga,ClasseNum,Data,Periodo,Parada\n\
             AF1,Anita Garibaldi,Aframax,Petroleiro,1,3/1/2024,90,30\n\
             AF2,Anita Garibaldi,Aframax,Petroleiro,1,3/1/2024,noventa,30\n",
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(rows[0].base_period_weeks, 90);
        assert_eq!(rows[0].max_accumulated_stoppage, Some(30));
    }

    #[test]
    fn ship_detail_dimensions_are_optional() {
        let (rows, _) = parse::<ShipDetail>(
            "Nome do navio,Classe,Tipo,Porte Bruto,Comprimento,Boca,Calado,Pontal\n\
             Cartola,Suezmax,Petroleiro,157000,274.2,,17,\n",
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].length_m, Some(274.2));
        assert_eq!(rows[0].beam_m, None);
        assert_eq!(rows[0].depth_m, None);
    }

    #[test]
    fn ship_detail_without_deadweight_is_skipped() {
        let (rows, stats) = parse::<ShipDetail>(
            "Nome do navio,Classe,Tipo,Porte Bruto\nCartola,Suezmax,Petroleiro,n/a\n",
        );
        assert!(rows.is_empty());
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn short_event_rows_keep_text_columns_empty() {
        let (rows, _) = parse::<NavigationEvent>("sessionId,shipName\nS1,Cartola\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vessel_name, "Cartola");
        assert!(rows[0].speed.is_empty());
    }

    #[test]
    fn consumption_keeps_quantity_as_text() {
        let (rows, _) = parse::<ConsumptionRecord>(
            "SESSION_ID,CONSUMED_QUANTITY,DESCRIPTION\nS1, 12.5 ,FO\n",
        );
        assert_eq!(rows[0].consumed_quantity, " 12.5 ");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file::<DockingRecord>(Path::new("/nonexistent/dados_docagem.csv"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{coerce_count, CrimeDataset, CrimeRecord, Month};

/// Required identifier columns (case-sensitive, as published).
pub const ENTITY_COLUMN: &str = "Entidad";
pub const YEAR_COLUMN: &str = "Año";
pub const CRIME_TYPE_COLUMN: &str = "Tipo de delito";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' not found in header")]
    MissingColumn(String),
    #[error("line {line}: year '{value}' is not an integer")]
    InvalidYear { line: u64, value: String },
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1; every byte maps to the code point of the same value.
    #[default]
    #[serde(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
    #[serde(alias = "utf-8")]
    Utf8,
}

impl TextEncoding {
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, LoadError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match self {
            TextEncoding::Latin1 => Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
            TextEncoding::Utf8 => Ok(Cow::Borrowed(std::str::from_utf8(bytes)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub encoding: TextEncoding,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Latin1,
            delimiter: b',',
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalise the crime table at `path`.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<CrimeDataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_bytes(&bytes, options)?;
    log::info!(
        "Loaded {} records from {} ({} years, {} entities)",
        dataset.len(),
        path.display(),
        dataset.years().count(),
        dataset.entities().count()
    );
    Ok(dataset)
}

/// Decode and parse an in-memory copy of the table.
pub fn parse_bytes(bytes: &[u8], options: &LoadOptions) -> Result<CrimeDataset, LoadError> {
    let text = options.encoding.decode(bytes)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let columns = ColumnIndex::locate(reader.headers()?)?;

    let mut records = Vec::new();
    let mut coerced = 0usize;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());

        let year_raw = row.get(columns.year).unwrap_or("");
        let year = year_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidYear {
                line,
                value: year_raw.to_string(),
            })?;

        let mut months = [None; 12];
        for (slot, &idx) in months.iter_mut().zip(columns.months.iter()) {
            let raw = row.get(idx).unwrap_or("");
            *slot = coerce_count(raw);
            if slot.is_none() && !raw.trim().is_empty() {
                coerced += 1;
            }
        }

        records.push(CrimeRecord {
            entity: row.get(columns.entity).unwrap_or("").trim().to_string(),
            year,
            crime_type: row.get(columns.crime_type).unwrap_or("").trim().to_string(),
            months,
        });
    }

    if coerced > 0 {
        log::warn!("{coerced} non-numeric month cells treated as missing");
    }

    Ok(CrimeDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Header lookup
// ---------------------------------------------------------------------------

/// Field positions of the required columns.
struct ColumnIndex {
    entity: usize,
    year: usize,
    crime_type: usize,
    months: [usize; 12],
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let mut months = [0usize; 12];
        for (slot, month) in months.iter_mut().zip(Month::ALL) {
            *slot = find(month.name())?;
        }

        Ok(ColumnIndex {
            entity: find(ENTITY_COLUMN)?,
            year: find(YEAR_COLUMN)?,
            crime_type: find(CRIME_TYPE_COLUMN)?,
            months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Año,Entidad,Tipo de delito,Enero,Febrero,Marzo,Abril,Mayo,Junio,Julio,Agosto,Septiembre,Octubre,Noviembre,Diciembre,Total_Anual";

    fn utf8() -> LoadOptions {
        LoadOptions {
            encoding: TextEncoding::Utf8,
            ..LoadOptions::default()
        }
    }

    #[test]
    fn parses_rows_and_recomputes_totals() {
        let csv = format!(
            "{HEADER}\n2020,Jalisco,Robo,10,5,,,,,,,,,,,999\n2020,Jalisco,Fraude,3,2,,,,,,,,,,,999\n"
        );
        let ds = parse_bytes(csv.as_bytes(), &utf8()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records()[0];
        assert_eq!(first.entity, "Jalisco");
        assert_eq!(first.year, 2020);
        assert_eq!(first.crime_type, "Robo");
        assert_eq!(first.month(Month::Enero), Some(10.0));
        assert_eq!(first.month(Month::Marzo), None);
        assert_eq!(first.annual_total(), 15.0);
        assert_eq!(ds.records()[1].annual_total(), 5.0);
    }

    #[test]
    fn decodes_latin1_headers_and_values() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"A\xF1o,Entidad,Tipo de delito,");
        bytes.extend_from_slice(
            b"Enero,Febrero,Marzo,Abril,Mayo,Junio,Julio,Agosto,Septiembre,Octubre,Noviembre,Diciembre\n",
        );
        bytes.extend_from_slice(b"2021,Michoac\xE1n,Lesiones,1,1,1,1,1,1,1,1,1,1,1,1\n");

        let ds = parse_bytes(&bytes, &LoadOptions::default()).unwrap();
        assert_eq!(ds.records()[0].entity, "Michoacán");
        assert_eq!(ds.records()[0].annual_total(), 12.0);
    }

    #[test]
    fn non_numeric_cells_become_missing() {
        let csv = format!("{HEADER}\n2019,Colima,Robo,abc,4,N/A,,,,,,,,,,\n");
        let ds = parse_bytes(csv.as_bytes(), &utf8()).unwrap();
        let record = &ds.records()[0];
        assert_eq!(record.month(Month::Enero), None);
        assert_eq!(record.month(Month::Febrero), Some(4.0));
        assert_eq!(record.month(Month::Marzo), None);
        assert_eq!(record.annual_total(), 4.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Año,Entidad,Tipo de delito,Enero\n2020,A,Robo,1\n";
        match parse_bytes(csv.as_bytes(), &utf8()) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Febrero"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_year_is_fatal() {
        let csv = format!("{HEADER}\ndos mil,A,Robo,1,,,,,,,,,,,,\n");
        match parse_bytes(csv.as_bytes(), &utf8()) {
            Err(LoadError::InvalidYear { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "dos mil");
            }
            other => panic!("expected InvalidYear, got {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_fatal() {
        let csv = format!("{HEADER}\n2020,A,Robo,1,2\n");
        assert!(matches!(
            parse_bytes(csv.as_bytes(), &utf8()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let bytes = b"A\xF1o,Entidad\n";
        assert!(matches!(
            parse_bytes(bytes, &utf8()),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn bom_and_custom_delimiter() {
        let header = HEADER.replace(',', ";");
        let csv = format!("\u{feff}{header}\n2022;B;Robo;1;2;3;;;;;;;;;;\n");
        let options = LoadOptions {
            encoding: TextEncoding::Utf8,
            delimiter: b';',
        };
        let ds = parse_bytes(csv.as_bytes(), &options).unwrap();
        assert_eq!(ds.records()[0].year, 2022);
        assert_eq!(ds.records()[0].annual_total(), 6.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(
            Path::new("definitely/not/here/estataldelitos.csv"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("estataldelitos.csv"));
    }
}

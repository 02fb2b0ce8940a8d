use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Month – the twelve fixed month columns, in calendar order
// ---------------------------------------------------------------------------

/// A calendar month.  The Spanish name doubles as the source column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Month {
    /// All months, January first.
    pub const ALL: [Month; 12] = [
        Month::Enero,
        Month::Febrero,
        Month::Marzo,
        Month::Abril,
        Month::Mayo,
        Month::Junio,
        Month::Julio,
        Month::Agosto,
        Month::Septiembre,
        Month::Octubre,
        Month::Noviembre,
        Month::Diciembre,
    ];

    /// Column header / display name.
    pub fn name(self) -> &'static str {
        match self {
            Month::Enero => "Enero",
            Month::Febrero => "Febrero",
            Month::Marzo => "Marzo",
            Month::Abril => "Abril",
            Month::Mayo => "Mayo",
            Month::Junio => "Junio",
            Month::Julio => "Julio",
            Month::Agosto => "Agosto",
            Month::Septiembre => "Septiembre",
            Month::Octubre => "Octubre",
            Month::Noviembre => "Noviembre",
            Month::Diciembre => "Diciembre",
        }
    }

    /// Zero-based position in the calendar (Enero = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Month> {
        Month::ALL.get(index).copied()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Period – which measure the ranked charts aggregate
// ---------------------------------------------------------------------------

/// The period axis: either the derived annual total or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    AnnualTotal,
    Month(Month),
}

impl Period {
    /// Annual total first, then the months in calendar order.
    pub fn options() -> Vec<Period> {
        std::iter::once(Period::AnnualTotal)
            .chain(Month::ALL.iter().copied().map(Period::Month))
            .collect()
    }

    /// The value this period measures on one record (missing counts as 0).
    pub fn value_of(self, record: &CrimeRecord) -> f64 {
        match self {
            Period::AnnualTotal => record.annual_total(),
            Period::Month(m) => record.month_value(m),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::AnnualTotal => f.write_str("Total_Anual"),
            Period::Month(m) => write!(f, "{m}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CrimeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One row: an entity, a year, a crime type and twelve monthly counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeRecord {
    pub entity: String,
    pub year: i32,
    pub crime_type: String,
    /// Monthly counts indexed by [`Month::index`]; `None` when the source cell
    /// was empty or not numeric.
    pub months: [Option<f64>; 12],
}

impl CrimeRecord {
    pub fn new(
        entity: impl Into<String>,
        year: i32,
        crime_type: impl Into<String>,
        months: [Option<f64>; 12],
    ) -> Self {
        Self {
            entity: entity.into(),
            year,
            crime_type: crime_type.into(),
            months,
        }
    }

    pub fn month(&self, month: Month) -> Option<f64> {
        self.months[month.index()]
    }

    /// Monthly value with missing treated as zero.
    pub fn month_value(&self, month: Month) -> f64 {
        self.month(month).unwrap_or(0.0)
    }

    /// Sum of the twelve months, missing treated as zero.  Always derived from
    /// the month cells; a total column in the source file is never consulted.
    pub fn annual_total(&self) -> f64 {
        self.months.iter().flatten().sum()
    }
}

/// Convert a raw cell into a monthly count.  Anything that does not parse as a
/// finite number becomes missing.
pub fn coerce_count(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// CrimeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The normalised dataset plus the distinct values that feed the selectors.
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CrimeDataset {
    records: Vec<CrimeRecord>,
    years: BTreeSet<i32>,
    entities: BTreeSet<String>,
}

impl CrimeDataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<CrimeRecord>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        let entities = records.iter().map(|r| r.entity.clone()).collect();
        CrimeDataset {
            records,
            years,
            entities,
        }
    }

    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    /// Distinct entity names, ascending.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(String::as_str)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Headline figures over the unfiltered dataset.
    pub fn summary(&self) -> Summary {
        let total: f64 = self.records.iter().map(CrimeRecord::annual_total).sum();
        let mean = if self.records.is_empty() {
            None
        } else {
            Some(total / self.records.len() as f64)
        };
        Summary {
            records: self.records.len(),
            total,
            mean,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary – the metrics panel
// ---------------------------------------------------------------------------

/// Row count, sum and mean of the annual totals.  `mean` is `None` for an
/// empty dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub records: usize,
    pub total: f64,
    pub mean: Option<f64>,
}

impl Summary {
    pub fn records_label(&self) -> String {
        group_thousands(self.records as u64)
    }

    /// Integer part of the grand total, thousands separated.
    pub fn total_label(&self) -> String {
        group_thousands(self.total.max(0.0).trunc() as u64)
    }

    pub fn mean_label(&self) -> String {
        match self.mean {
            Some(mean) => format!("{mean:.2}"),
            None => "N/D".to_string(),
        }
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(values: &[Option<f64>]) -> [Option<f64>; 12] {
        let mut out = [None; 12];
        out[..values.len()].copy_from_slice(values);
        out
    }

    #[test]
    fn annual_total_treats_missing_as_zero() {
        let record = CrimeRecord::new(
            "Jalisco",
            2020,
            "Robo",
            months(&[Some(10.0), None, Some(5.0), None, Some(2.5)]),
        );
        assert_eq!(record.annual_total(), 17.5);
        assert_eq!(record.month_value(Month::Febrero), 0.0);
        assert_eq!(record.month(Month::Febrero), None);
    }

    #[test]
    fn coerce_count_turns_garbage_into_missing() {
        assert_eq!(coerce_count(" 12 "), Some(12.0));
        assert_eq!(coerce_count("3.5"), Some(3.5));
        assert_eq!(coerce_count(""), None);
        assert_eq!(coerce_count("n/a"), None);
        assert_eq!(coerce_count("1,234"), None);
        assert_eq!(coerce_count("NaN"), None);
        assert_eq!(coerce_count("inf"), None);
    }

    #[test]
    fn months_are_in_calendar_order() {
        assert_eq!(Month::ALL[0], Month::Enero);
        assert_eq!(Month::ALL[11], Month::Diciembre);
        for (i, m) in Month::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Month::from_index(i), Some(*m));
        }
        assert_eq!(Month::from_index(12), None);
        assert_eq!(Month::Septiembre.to_string(), "Septiembre");
    }

    #[test]
    fn period_options_start_with_annual_total() {
        let options = Period::options();
        assert_eq!(options.len(), 13);
        assert_eq!(options[0], Period::AnnualTotal);
        assert_eq!(options[1], Period::Month(Month::Enero));
        assert_eq!(options[12], Period::Month(Month::Diciembre));
        assert_eq!(Period::AnnualTotal.to_string(), "Total_Anual");
    }

    #[test]
    fn dataset_indexes_distinct_sorted_values() {
        let ds = CrimeDataset::from_records(vec![
            CrimeRecord::new("Sonora", 2021, "Robo", [None; 12]),
            CrimeRecord::new("Colima", 2019, "Robo", [None; 12]),
            CrimeRecord::new("Sonora", 2019, "Fraude", [None; 12]),
        ]);
        assert_eq!(ds.years().collect::<Vec<_>>(), vec![2019, 2021]);
        assert_eq!(ds.entities().collect::<Vec<_>>(), vec!["Colima", "Sonora"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn summary_of_empty_dataset_has_no_mean() {
        let summary = CrimeDataset::default().summary();
        assert_eq!(summary.records, 0);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.mean_label(), "N/D");
        assert_eq!(summary.total_label(), "0");
    }

    #[test]
    fn summary_uses_derived_totals() {
        let ds = CrimeDataset::from_records(vec![
            CrimeRecord::new("A", 2020, "Robo", months(&[Some(1000.0), Some(234.0)])),
            CrimeRecord::new("B", 2020, "Robo", months(&[Some(1.0), None, Some(2.0)])),
        ]);
        let summary = ds.summary();
        assert_eq!(summary.total, 1237.0);
        assert_eq!(summary.total_label(), "1,237");
        assert_eq!(summary.mean_label(), "618.50");
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}

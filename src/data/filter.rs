use std::fmt;

use super::model::{CrimeDataset, CrimeRecord, Month, Period};

// ---------------------------------------------------------------------------
// Selection – "all" or one concrete value
// ---------------------------------------------------------------------------

/// A selector value.  `All` disables the corresponding filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Specific(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Specific(selected) => selected == value,
        }
    }
}

impl Selection<i32> {
    /// Display label for the year axis.
    pub fn year_label(&self) -> String {
        match self {
            Selection::All => "Todos los años".to_string(),
            Selection::Specific(year) => year.to_string(),
        }
    }
}

impl Selection<String> {
    /// Display label for the entity axis.
    pub fn entity_label(&self) -> &str {
        match self {
            Selection::All => "Todas",
            Selection::Specific(entity) => entity,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters – the three selector axes
// ---------------------------------------------------------------------------

/// The user's current selection on every axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    pub year: Selection<i32>,
    pub entity: Selection<String>,
    /// Measure used by the ranked charts; does not filter rows.
    pub period: Period,
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={} entity={} period={}",
            self.year.year_label(),
            self.entity.entity_label(),
            self.period
        )
    }
}

/// Year selector options: `All` followed by every distinct year, ascending.
pub fn year_options(dataset: &CrimeDataset) -> Vec<Selection<i32>> {
    std::iter::once(Selection::All)
        .chain(dataset.years().map(Selection::Specific))
        .collect()
}

/// Entity selector options: `All` followed by every distinct entity, ascending.
pub fn entity_options(dataset: &CrimeDataset) -> Vec<Selection<String>> {
    std::iter::once(Selection::All)
        .chain(dataset.entities().map(|e| Selection::Specific(e.to_string())))
        .collect()
}

// ---------------------------------------------------------------------------
// View – borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Records that passed a filter.  Borrows from the dataset, never copies it.
#[derive(Debug, Clone)]
pub struct View<'a> {
    records: Vec<&'a CrimeRecord>,
}

impl<'a> View<'a> {
    /// Keep rows matching both the year and the entity selection.
    pub fn filtered(dataset: &'a CrimeDataset, filters: &Filters) -> Self {
        Self::select(dataset, &filters.year, &filters.entity)
    }

    /// Keep rows matching the year selection only.
    pub fn by_year(dataset: &'a CrimeDataset, year: &Selection<i32>) -> Self {
        Self::select(dataset, year, &Selection::All)
    }

    fn select(dataset: &'a CrimeDataset, year: &Selection<i32>, entity: &Selection<String>) -> Self {
        let records = dataset
            .records()
            .iter()
            .filter(|r| year.admits(&r.year))
            .filter(|r| entity.admits(&r.entity))
            .collect();
        View { records }
    }

    pub fn records(&self) -> &[&'a CrimeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Months with at least one non-missing value in this view, calendar order.
    pub fn available_months(&self) -> Vec<Month> {
        Month::ALL
            .into_iter()
            .filter(|&m| self.records.iter().any(|r| r.month(m).is_some()))
            .collect()
    }
}

/// Caption shown when the view does not cover the whole year.
pub fn partial_year_note(available: &[Month], year: &Selection<i32>) -> Option<String> {
    if available.len() >= Month::ALL.len() {
        return None;
    }
    match available.last() {
        Some(last) => Some(format!(
            "Nota: {} tiene datos hasta {last}. Las cifras mostradas son acumuladas (YTD).",
            year.year_label()
        )),
        None => Some("Nota: no hay datos mensuales para la selección actual.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, year: i32, filled: &[(Month, f64)]) -> CrimeRecord {
        let mut months = [None; 12];
        for &(m, v) in filled {
            months[m.index()] = Some(v);
        }
        CrimeRecord::new(entity, year, "Robo", months)
    }

    fn dataset() -> CrimeDataset {
        CrimeDataset::from_records(vec![
            record("Sonora", 2021, &[(Month::Enero, 1.0)]),
            record("Colima", 2020, &[(Month::Enero, 2.0)]),
            record("Sonora", 2020, &[(Month::Febrero, 3.0)]),
            record("Colima", 2021, &[(Month::Marzo, 4.0)]),
        ])
    }

    #[test]
    fn all_selections_keep_every_record_in_order() {
        let ds = dataset();
        let view = View::filtered(&ds, &Filters::default());
        assert_eq!(view.len(), ds.len());
        for (kept, original) in view.records().iter().zip(ds.records()) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn year_and_entity_compose() {
        let ds = dataset();
        let filters = Filters {
            year: Selection::Specific(2020),
            entity: Selection::Specific("Sonora".to_string()),
            ..Filters::default()
        };
        let view = View::filtered(&ds, &filters);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].entity, "Sonora");
        assert_eq!(view.records()[0].year, 2020);

        let by_year = View::by_year(&ds, &filters.year);
        assert_eq!(by_year.len(), 2);
    }

    #[test]
    fn options_carry_all_sentinel_then_sorted_values() {
        let ds = dataset();
        assert_eq!(
            year_options(&ds),
            vec![Selection::All, Selection::Specific(2020), Selection::Specific(2021)]
        );
        assert_eq!(
            entity_options(&ds),
            vec![
                Selection::All,
                Selection::Specific("Colima".to_string()),
                Selection::Specific("Sonora".to_string()),
            ]
        );
    }

    #[test]
    fn entity_named_like_sentinel_is_still_filterable() {
        let ds = CrimeDataset::from_records(vec![
            record("Todas", 2020, &[(Month::Enero, 1.0)]),
            record("Sonora", 2020, &[(Month::Enero, 1.0)]),
        ]);
        let filters = Filters {
            entity: Selection::Specific("Todas".to_string()),
            ..Filters::default()
        };
        assert_eq!(View::filtered(&ds, &filters).len(), 1);
    }

    #[test]
    fn available_months_follow_calendar_order() {
        let ds = CrimeDataset::from_records(vec![
            record("A", 2023, &[(Month::Marzo, 1.0)]),
            record("A", 2023, &[(Month::Enero, 1.0), (Month::Febrero, 0.0)]),
        ]);
        let view = View::filtered(&ds, &Filters::default());
        assert_eq!(
            view.available_months(),
            vec![Month::Enero, Month::Febrero, Month::Marzo]
        );
    }

    #[test]
    fn partial_year_note_names_last_available_month() {
        let available = [Month::Enero, Month::Febrero, Month::Marzo];
        let note = partial_year_note(&available, &Selection::Specific(2024)).unwrap();
        assert!(note.contains("2024"));
        assert!(note.contains("hasta Marzo"));
    }

    #[test]
    fn full_year_has_no_note_and_empty_view_has_generic_note() {
        assert_eq!(partial_year_note(&Month::ALL, &Selection::All), None);
        let note = partial_year_note(&[], &Selection::Specific(1990)).unwrap();
        assert!(note.contains("no hay datos"));
    }
}

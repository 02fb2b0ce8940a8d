use std::collections::BTreeMap;

use super::filter::{partial_year_note, Filters, Selection, View};
use super::model::{CrimeDataset, Month, Period};

/// Default number of groups kept by the ranked charts.
pub const DEFAULT_TOP_N: usize = 15;

// ---------------------------------------------------------------------------
// Chart-ready results
// ---------------------------------------------------------------------------

/// Total cases per month, calendar order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub title: String,
    pub points: Vec<(Month, f64)>,
}

/// One bar of a ranked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBar {
    pub label: String,
    pub value: f64,
    /// Set on the single highest bar only.
    pub highlighted: bool,
}

/// Groups sorted by value, largest first, truncated to the top N.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub title: String,
    /// Name of the measured quantity, used as the value-axis label.
    pub measure: String,
    pub bars: Vec<RankedBar>,
}

impl Ranking {
    pub fn leader(&self) -> Option<&RankedBar> {
        self.bars.first()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Everything the dashboard renders for one set of filters.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub available_months: Vec<Month>,
    pub note: Option<String>,
    pub temporal: MonthlySeries,
    pub crime_types: Ranking,
    pub entities: Ranking,
}

impl DashboardView {
    /// Recompute every chart from the dataset and the current filters.
    pub fn compute(dataset: &CrimeDataset, filters: &Filters, top_n: usize) -> Self {
        let view = View::filtered(dataset, filters);
        let available_months = view.available_months();
        let note = partial_year_note(&available_months, &filters.year);

        let temporal = MonthlySeries {
            title: format!("Evolución mensual de delitos en {}", filters.year.year_label()),
            points: monthly_totals(&view, &available_months),
        };
        let crime_types = crime_type_ranking(&view, filters.period, &filters.year, top_n);
        let entities = entity_ranking(dataset, &filters.year, filters.period, top_n);

        log::debug!(
            "Recomputed dashboard ({filters}): {} rows, {} months, {} crime types, {} entities",
            view.len(),
            available_months.len(),
            crime_types.bars.len(),
            entities.bars.len()
        );

        DashboardView {
            available_months,
            note,
            temporal,
            crime_types,
            entities,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

/// Sum each available month across the view.  Missing cells count as zero and
/// the output follows `available`, which is expected in calendar order.
pub fn monthly_totals(view: &View<'_>, available: &[Month]) -> Vec<(Month, f64)> {
    available
        .iter()
        .map(|&m| (m, view.records().iter().map(|r| r.month_value(m)).sum()))
        .collect()
}

/// Rank crime types in the fully filtered view by the selected period.
pub fn crime_type_ranking(
    view: &View<'_>,
    period: Period,
    year: &Selection<i32>,
    top_n: usize,
) -> Ranking {
    let groups = view
        .records()
        .iter()
        .map(|r| (r.crime_type.as_str(), period.value_of(r)));

    Ranking {
        title: format!(
            "Top {top_n} tipos de delito: {period} ({})",
            year.year_label()
        ),
        measure: period.to_string(),
        bars: rank(groups, top_n),
    }
}

/// Rank entities by the selected period.  Only the year filter applies so that
/// every entity stays comparable regardless of the entity selector.
pub fn entity_ranking(
    dataset: &CrimeDataset,
    year: &Selection<i32>,
    period: Period,
    top_n: usize,
) -> Ranking {
    let view = View::by_year(dataset, year);
    let groups = view
        .records()
        .iter()
        .map(|r| (r.entity.as_str(), period.value_of(r)));

    let title = match period {
        Period::Month(m) => format!(
            "Top {top_n} entidades por delitos en {m} ({})",
            year.year_label()
        ),
        Period::AnnualTotal => format!(
            "Top {top_n} entidades por delitos anuales ({})",
            year.year_label()
        ),
    };

    Ranking {
        title,
        measure: period.to_string(),
        bars: rank(groups, top_n),
    }
}

/// Sum values per label, sort descending (ties by label) and keep `top_n`.
fn rank<'a>(groups: impl Iterator<Item = (&'a str, f64)>, top_n: usize) -> Vec<RankedBar> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for (label, value) in groups {
        *sums.entry(label).or_default() += value;
    }

    let mut sorted: Vec<(&str, f64)> = sums.into_iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted.truncate(top_n);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| RankedBar {
            label: label.to_string(),
            value,
            highlighted: i == 0,
        })
        .collect()
}

/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  estataldelitos.csv (Latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse → CrimeRecord, month cells coerced
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ CrimeDataset  │  Vec<CrimeRecord>, distinct years / entities
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Filters (year, entity, period) → borrowed View
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  monthly series, crime-type / entity rankings
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (typed Records)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset │  Vec<Record>, neighborhood + day index (read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  neighborhood == N && address ∋ street → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  location buckets, day groups, tallies
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  loader   │◄────│  cache    │  path → Arc<ListingTable>
///   └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, schema, category index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → FilteredView
///   └──────────┘
///        │
///        ├──► summary    row count, medians
///        ├──► histogram  odometer bins
///        └──► scatter    (odometer, price) pairs
/// ```

pub mod cache;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod scatter;
pub mod summary;

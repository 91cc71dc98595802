/// Data layer: core types, loading, and the view pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  alias lookup → StudentDataset (immutable)
///   └───────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ bulk · filter · sort  │  dataset + params → view indices
///   └──────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  view → count, mean GPA, branch tallies
///   └──────────┘
/// ```

pub mod bulk;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod sort;
pub mod stats;

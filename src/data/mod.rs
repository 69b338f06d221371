/// Data layer: table types, loading, and spread computation.
///
/// Architecture:
/// ```text
///  Cantor_BNP_Repo_Market_Data_with_DFF.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → RateTable (sorted index, Option<f64> cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  spread   │  100 × (column − DFF) → SpreadTable
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod spread;

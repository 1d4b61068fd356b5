/// Data layer: core types, loading, aggregation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<LaunchRecord>, site index, payload bounds
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │  filter   │  pie slices / scatter rows
///   └───────────┘  └──────────┘
///        │              │
///        └──────┬───────┘
///               ▼
///          ┌────────┐
///          │  view   │  handle_event(inputs) → DashboardView
///          └────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;

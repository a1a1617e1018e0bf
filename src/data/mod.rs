/// Data layer: results tables, class split, and decision-tree cuts.
///
/// Architecture:
/// ```text
///  .pat / .csv / .json          trees.txt
///        │                          │
///        ▼                          ▼
///   ┌──────────┐              ┌──────────┐
///   │  loader   │             │   cuts    │  scan records + dimension table
///   └──────────┘              └──────────┘
///        │                          │
///        ▼                          │
///   ┌──────────────┐                │
///   │ ResultsTable  │  columns, header index
///   └──────────────┘                │
///        │                          │
///        ▼                          │
///   ┌──────────┐                    │
///   │ classes   │  timeslides / injections
///   └──────────┘                    │
///        └──────────► scene ◄───────┘
/// ```

pub mod classes;
pub mod cuts;
pub mod loader;
pub mod model;

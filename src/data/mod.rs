/// Data layer: tabular input model, parsing, and column resolution.
///
/// Architecture:
/// ```text
///  delimited bytes          report text
///        │                      │
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  loader   │          │ document │  strategy list → table / scalar
///   └──────────┘          └──────────┘
///        │                      │
///        └──────────┬───────────┘
///                   ▼
///             ┌──────────┐
///             │ RawTable  │  Vec<Column>, untrusted names
///             └──────────┘
///                   │
///                   ▼
///             ┌──────────┐
///             │ resolver  │  role keywords → column
///             └──────────┘
/// ```
pub mod document;
pub mod loader;
pub mod model;
pub mod resolver;

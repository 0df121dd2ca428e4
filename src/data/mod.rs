/// Data layer: table types, import, and spreadsheet export.
///
/// Architecture:
/// ```text
///  cue log .txt ("Assemble List" export)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  find marker → tab-separated rows → RawRow
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  drop repeated headers / empty clips, sort by clip
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Record> (MasDur, Clip)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Table → <stem>.xlsx
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

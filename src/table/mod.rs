//! Table state: rows, selection, search filtering and drag reordering.
//!
//! Everything in this module is plain data manipulation. Rendering and input
//! translation live in `ui` and `app`.

mod drag;
mod filter;
mod ids;
mod row;
mod selection;
mod store;

pub use drag::DragState;
pub use filter::{filter_rows, matches};
pub use ids::{ClockIds, IdGenerator, IdStrategy, SequentialIds};
pub use row::{
    fixture_rows, format_timestamp, now_timestamp, Enrichment, EnrichmentStatus, Row, RowId,
};
pub use selection::SelectionSet;
pub use store::{RowStore, StoreError};

//! Client-side logic over the loaded financial entries.
//!
//! Everything here is pure and synchronous: the terminal client fetches the
//! full collection, then derives what it shows through these functions.

pub use date::{display_date, parse_date};
pub use error::EngineError;
pub use filter::{filter_entries, matches};
pub use form::EntryForm;
pub use money::Money;
pub use pagination::{PAGE_SIZE, Paginator};
pub use status::{toggled, toggled_status};
pub use summary::{CategoryTotal, Summary, UNCATEGORIZED};

mod date;
mod error;
mod filter;
mod form;
mod money;
mod pagination;
mod status;
mod summary;

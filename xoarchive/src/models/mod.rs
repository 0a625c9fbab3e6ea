//! Domain types for the APOD archive.

pub mod clock;
pub mod date_range;
pub mod entry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::{DateRange, HalfYear, APOD_EPOCH};
pub use entry::{normalize_batch, ArchiveEntry, MediaType};

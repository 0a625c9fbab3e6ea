//! Headless client core behind the gallery front end.
//!
//! Control flow: [`filter::DateFilter`] yields a start date,
//! [`archive::ArchiveClient`] fetches the batch, [`gallery::GalleryView`]
//! renders it and reports a selected index, and [`viewer::DetailViewer`]
//! navigates from there. Rendering itself is left to the embedding front end.

pub mod archive;
pub mod filter;
pub mod gallery;
pub mod page;
pub mod viewer;

pub use archive::{ArchiveClient, ArchiveClientOptions, ArchiveState, LoadOutcome};
pub use filter::{DateFilter, HalfOption, InteractionMode, YearRow};
pub use gallery::{GalleryCard, GalleryModel, GalleryView, PlaceholderCard};
pub use page::{MemoryPage, Overflow, PageHost};
pub use viewer::{DetailViewer, Direction, Key, ViewerError, ViewerInput, ViewerOutcome};

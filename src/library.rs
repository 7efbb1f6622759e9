//! Track library: the ordered, append-only collection of tracks.
//!
//! `Library` is the single owner of track records and favorite flags. Other
//! components refer to entries by `TrackId` only. `scan` seeds a library from
//! a directory on disk.

mod display;
mod model;
mod scan;
mod store;

pub use display::display_name;
pub use model::{Track, TrackId, TrackSource};
pub use scan::scan;
pub use store::Library;

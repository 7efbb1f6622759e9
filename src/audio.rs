//! Audio subsystem: a `MediaHandle` backed by a dedicated `rodio` thread.
//!
//! `RodioHandle` turns handle calls into `AudioCmd`s. The audio thread owns the
//! output stream and the current sink, and reports position, duration, end of
//! track and play results back to every subscriber.

mod handle;
mod sink;
mod subscribers;
mod thread;
mod types;

pub use handle::RodioHandle;

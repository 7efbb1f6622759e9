//! Application module: the state the runtime mutates and the UI reads.
//!
//! `App` lives in `app::model`; it ties the library, filter, playback
//! controller and add-track wizard together behind intent methods.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

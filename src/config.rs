//! Settings for cadence, layered from defaults, an optional TOML file and
//! `CADENCE__*` environment variables.

mod load;
mod schema;

pub use schema::*;

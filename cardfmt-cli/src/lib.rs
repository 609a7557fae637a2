//! Library half of the `cardfmt` binary, split out so commands can be tested
//! against in-memory writers.

pub mod check;
pub mod cli;
pub mod logging;
pub mod rules;
pub mod scan;

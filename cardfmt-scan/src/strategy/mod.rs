//! Content source strategies.
//!
//! Only the filesystem source exists today, behind the concrete
//! [`crate::scan_fs`] entry point.

pub mod fs;

//! End-to-end run: directories, resolution, rendering, assembly, cleanup.

/// Sequential pipeline driver.
pub mod driver;

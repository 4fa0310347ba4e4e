//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific stage of the
//! servo pipeline against mock hardware.  All tests run on the host
//! (x86_64) with no real hardware required.

mod centering_tests;
mod control_loop_tests;

//! Domain layer - pure test case generation logic.
//!
//! No I/O lives here: prompt construction, response normalization, and record
//! projection are all synchronous functions over plain data.

pub mod testcase;

//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! either against mock adapters or against the full driver stack on the
//! in-memory register file.  All tests run on the host with no real
//! hardware required.

mod board_tests;
mod control_loop_tests;
mod mock_hw;

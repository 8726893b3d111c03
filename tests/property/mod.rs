//! Property-based tests for the dressing room simulator.

pub mod rooms;

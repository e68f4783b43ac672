//! Tests for the attribute containers

mod list_tests;
mod map_tests;

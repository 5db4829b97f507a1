//! Integration tests for rs-readability
//!
//! These tests run the complete extraction pipeline end-to-end on realistic
//! pages and on unusual inputs.

mod edge_cases;
mod real_world_articles;

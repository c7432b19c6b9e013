//! Integration suite for the Cellarium server core
//!
//! Exercises the public facade end-to-end: search ranking and collapsing
//! through the cache, and the full session lifecycle against real
//! temporary directories.

mod search_pipeline;
mod session_lifecycle;

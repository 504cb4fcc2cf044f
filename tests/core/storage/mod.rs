//! Storage layer tests
//!
//! JSON persistence across restarts and similarity ranking over
//! stored vectors.

mod test_json_store;

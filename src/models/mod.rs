// src/models/mod.rs

pub mod notebook;
pub mod prep_pilot;
pub mod test_result;

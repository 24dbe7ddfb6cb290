// src/handlers/mod.rs

pub mod test_result;

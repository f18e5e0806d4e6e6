// src/models/mod.rs

pub mod challenge;
pub mod content;
pub mod quiz;
pub mod score;

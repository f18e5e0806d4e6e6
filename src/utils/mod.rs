// src/utils/mod.rs

pub mod daily;
pub mod html;
pub mod sampling;

//! Core configuration shared by every layer

pub mod config;

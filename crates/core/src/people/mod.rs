//! Person profiles

pub mod ports;

//! User directory

pub mod ports;

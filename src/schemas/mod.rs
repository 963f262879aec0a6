pub mod bar;
pub mod common;
pub mod share;

pub mod demo;
pub mod theme;

//! IB Commerce guided demo front end.
//!
//! A desktop window listing the product modules. Picking one opens the
//! "try before you buy" walkthrough driven by [`demo_engine`]: steps advance
//! on their own, KPI numbers wobble to look live, and the last step offers to
//! activate the module.

pub mod cli;
pub mod ui;

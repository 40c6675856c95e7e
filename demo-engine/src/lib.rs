//! Guided product demo engine for IB Commerce.
//!
//! Drives the "try before you buy" walkthrough: a fixed sequence of steps per
//! product module, each with KPIs whose numbers jitter on a timer to look live.
//!
//! # Example
//! ```rust
//! use demo_engine::{Catalog, DemoSettings, DemoSimulation};
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut sim = DemoSimulation::open(Catalog::builtin(), "finance", "IB Finance", &DemoSettings::default(), t0);
//! assert_eq!(sim.current().title, "Accounts Receivable");
//!
//! // Five seconds later the walkthrough moves on by itself.
//! sim.poll(t0 + Duration::from_secs(5));
//! assert_eq!(sim.current_step(), 1);
//! ```

mod catalog;
mod error;
mod metric;
mod modal;
mod settings;
mod simulation;
mod timer;
mod view;

pub use catalog::{Catalog, ModuleConfig, Step, DEFAULT_MODULE};
pub use error::{CatalogError, Result};
pub use metric::{jitter, parse_numeric_base, Metric, MetricValue, TrendTone};
pub use modal::{Callback, DemoModal};
pub use settings::DemoSettings;
pub use simulation::{DemoSimulation, PollOutcome, SimulationState};
pub use timer::IntervalTimer;
pub use view::{MetricView, StepView};

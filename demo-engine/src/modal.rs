//! The "try before you buy" modal as seen by the page embedding it.
//!
//! The embedding side owns the open flag and two callbacks. The simulation
//! only exists while the modal is open; closing drops it.

use crate::catalog::Catalog;
use crate::settings::DemoSettings;
use crate::simulation::{DemoSimulation, PollOutcome};
use crate::view::StepView;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub type Callback = Box<dyn FnMut()>;

pub struct DemoModal {
    catalog: Arc<Catalog>,
    settings: DemoSettings,
    module_type: String,
    module_name: String,
    on_close: Callback,
    on_proceed: Callback,
    simulation: Option<DemoSimulation>,
}

impl DemoModal {
    pub fn new(
        catalog: Arc<Catalog>,
        settings: DemoSettings,
        module_type: &str,
        module_name: &str,
    ) -> Self {
        Self {
            catalog,
            settings,
            module_type: module_type.to_string(),
            module_name: module_name.to_string(),
            on_close: Box::new(|| {}),
            on_proceed: Box::new(|| {}),
            simulation: None,
        }
    }

    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Box::new(callback);
        self
    }

    pub fn on_proceed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_proceed = Box::new(callback);
        self
    }

    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn is_open(&self) -> bool {
        self.simulation.is_some()
    }

    /// Mirrors the embedding's open flag. Opening an already open modal keeps
    /// the running simulation; closing drops it without calling `on_close`.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        match (open, self.simulation.is_some()) {
            (true, false) => {
                self.simulation = Some(DemoSimulation::open(
                    &self.catalog,
                    &self.module_type,
                    &self.module_name,
                    &self.settings,
                    now,
                ));
            }
            (false, true) => {
                if let Some(sim) = self.simulation.take() {
                    sim.close();
                }
            }
            _ => {}
        }
    }

    /// Points the modal at another module. An open modal restarts on the new
    /// module's first step.
    pub fn set_module(&mut self, module_type: &str, module_name: &str, now: Instant) {
        self.module_type = module_type.to_string();
        self.module_name = module_name.to_string();
        if self.is_open() {
            self.set_open(false, now);
            self.set_open(true, now);
        }
    }

    /// User dismissed the modal: drop the simulation and notify the embedding.
    pub fn close(&mut self) {
        if let Some(sim) = self.simulation.take() {
            sim.close();
            (self.on_close)();
        }
    }

    /// Terminal action. Fires `on_proceed` once per call, only from the last
    /// step of an open modal.
    pub fn proceed(&mut self) -> bool {
        let ready = self.simulation.as_ref().is_some_and(|sim| sim.proceed());
        if ready {
            info!(module = %self.module_type, "proceeding to activation");
            (self.on_proceed)();
        }
        ready
    }

    /// Proceeds and dismisses the modal without calling `on_close`.
    /// Returns the catalog key that was actually walked through, which differs
    /// from `module_type` when the modal fell back to the default module.
    pub fn activate(&mut self, now: Instant) -> Option<String> {
        if !self.proceed() {
            return None;
        }
        let key = self
            .simulation
            .as_ref()
            .map(|sim| sim.module_key().to_string());
        self.set_open(false, now);
        key
    }

    pub fn poll(&mut self, now: Instant) -> PollOutcome {
        self.simulation
            .as_mut()
            .map(|sim| sim.poll(now))
            .unwrap_or_default()
    }

    pub fn simulation(&self) -> Option<&DemoSimulation> {
        self.simulation.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut DemoSimulation> {
        self.simulation.as_mut()
    }

    pub fn view(&self) -> Option<StepView> {
        self.simulation.as_ref().map(DemoSimulation::view)
    }
}

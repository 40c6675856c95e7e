//! The guided walkthrough state machine.
//!
//! A [`DemoSimulation`] owns the steps of one module, the current position,
//! and two repeating timers: a short one that re-jitters the displayed metric
//! values and a long one that advances to the next step. Both timers are
//! re-armed on every change of step or running flag and cancelled on pause,
//! so neither can fire against a step it was not armed for.

use crate::catalog::{Catalog, Step};
use crate::metric::jitter;
use crate::settings::DemoSettings;
use crate::timer::IntervalTimer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Mutable state of one open demo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub current_step: usize,
    pub is_running: bool,
    /// Jittered value per metric position of the current step.
    pub displayed_values: HashMap<usize, f64>,
}

/// What a call to [`DemoSimulation::poll`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub ticked: bool,
    pub advanced: bool,
}

impl PollOutcome {
    pub fn changed(&self) -> bool {
        self.ticked || self.advanced
    }
}

pub struct DemoSimulation<R = StdRng> {
    module_key: String,
    module_name: String,
    steps: Vec<Step>,
    state: SimulationState,
    tick_timer: IntervalTimer,
    advance_timer: IntervalTimer,
    jitter_ratio: f64,
    rng: R,
}

impl DemoSimulation<StdRng> {
    /// Opens a running demo on the first step of `module_type`. Unknown module
    /// types fall back to the catalog default.
    pub fn open(
        catalog: &Catalog,
        module_type: &str,
        module_name: &str,
        settings: &DemoSettings,
        now: Instant,
    ) -> Self {
        Self::with_rng(
            catalog,
            module_type,
            module_name,
            settings,
            now,
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> DemoSimulation<R> {
    pub fn with_rng(
        catalog: &Catalog,
        module_type: &str,
        module_name: &str,
        settings: &DemoSettings,
        now: Instant,
        rng: R,
    ) -> Self {
        let (key, module) = catalog.resolve(module_type);
        let mut sim = Self {
            module_key: key.to_string(),
            module_name: module_name.to_string(),
            steps: module.steps.clone(),
            state: SimulationState {
                current_step: 0,
                is_running: true,
                displayed_values: HashMap::new(),
            },
            tick_timer: IntervalTimer::new(settings.tick_interval()),
            advance_timer: IntervalTimer::new(settings.advance_interval()),
            jitter_ratio: settings.jitter_ratio,
            rng,
        };
        sim.rearm(now);
        info!(
            module = %sim.module_key,
            name = %sim.module_name,
            steps = sim.steps.len(),
            "demo opened"
        );
        sim
    }

    pub fn module_key(&self) -> &str {
        &self.module_key
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step + 1 >= self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current(&self) -> &Step {
        &self.steps[self.state.current_step]
    }

    pub fn displayed_value(&self, position: usize) -> Option<f64> {
        self.state.displayed_values.get(&position).copied()
    }

    pub fn advance_to_next(&mut self, now: Instant) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.set_step(self.state.current_step + 1, now)
    }

    pub fn go_to_previous(&mut self, now: Instant) -> bool {
        if self.state.current_step == 0 {
            return false;
        }
        self.set_step(self.state.current_step - 1, now)
    }

    /// Jumps straight to `index`. Out-of-range indices are ignored.
    pub fn jump_to_step(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.steps.len() {
            warn!(index, total = self.steps.len(), "ignoring jump past last step");
            return false;
        }
        self.set_step(index, now)
    }

    /// Pauses or resumes both timers. Resuming starts fresh intervals.
    /// Returns the new running flag.
    pub fn toggle_running(&mut self, now: Instant) -> bool {
        self.state.is_running = !self.state.is_running;
        if self.state.is_running {
            self.rearm(now);
        } else {
            self.tick_timer.cancel();
            self.advance_timer.cancel();
        }
        debug!(running = self.state.is_running, "demo running toggled");
        self.state.is_running
    }

    /// Whether the terminal "proceed" action is available. Never mutates state.
    pub fn proceed(&self) -> bool {
        if !self.is_last_step() {
            return false;
        }
        info!(module = %self.module_key, "demo proceed requested");
        true
    }

    /// Fires whichever timers are due. Call this from the event loop.
    pub fn poll(&mut self, now: Instant) -> PollOutcome {
        let mut outcome = PollOutcome::default();
        if !self.state.is_running {
            return outcome;
        }
        if self.tick_timer.poll(now) {
            self.tick();
            outcome.ticked = true;
        }
        // On the last step this re-arms and does nothing.
        if self.advance_timer.poll(now) {
            outcome.advanced = self.advance_to_next(now);
        }
        outcome
    }

    /// Earliest instant at which `poll` can change anything.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tick_timer.next_due(), self.advance_timer.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn close(self) {
        info!(module = %self.module_key, step = self.state.current_step, "demo closed");
    }

    fn tick(&mut self) {
        let step = &self.steps[self.state.current_step];
        for (i, metric) in step.metrics.iter().enumerate() {
            let u: f64 = self.rng.gen();
            self.state
                .displayed_values
                .insert(i, jitter(metric.value.base(), u, self.jitter_ratio));
        }
        trace!(step = self.state.current_step, metrics = step.metrics.len(), "tick");
    }

    fn set_step(&mut self, index: usize, now: Instant) -> bool {
        if index == self.state.current_step {
            return false;
        }
        self.state.current_step = index;
        self.state.displayed_values.clear();
        self.rearm(now);
        debug!(
            step = index,
            title = %self.steps[index].title,
            "demo step changed"
        );
        true
    }

    fn rearm(&mut self, now: Instant) {
        if self.state.is_running {
            self.tick_timer.arm(now);
            self.advance_timer.arm(now);
        }
    }
}

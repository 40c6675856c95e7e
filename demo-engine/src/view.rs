use crate::metric::TrendTone;
use crate::simulation::DemoSimulation;
use rand::Rng;

/// Render-ready snapshot of the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub module_name: String,
    pub step_index: usize,
    pub total_steps: usize,
    pub title: String,
    pub description: String,
    pub metrics: Vec<MetricView>,
    pub step_titles: Vec<String>,
    pub is_running: bool,
    pub is_last_step: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub label: String,
    pub display: String,
    pub trend: String,
    pub tone: TrendTone,
}

impl<R: Rng> DemoSimulation<R> {
    pub fn view(&self) -> StepView {
        let step = self.current();
        let metrics = step
            .metrics
            .iter()
            .enumerate()
            .map(|(i, m)| MetricView {
                label: m.label.clone(),
                display: m.display(self.displayed_value(i)),
                trend: m.trend.clone(),
                tone: m.tone(),
            })
            .collect();

        StepView {
            module_name: self.module_name().to_string(),
            step_index: self.current_step(),
            total_steps: self.total_steps(),
            title: step.title.clone(),
            description: step.description.clone(),
            metrics,
            step_titles: self.steps().iter().map(|s| s.title.clone()).collect(),
            is_running: self.is_running(),
            is_last_step: self.is_last_step(),
        }
    }
}

impl StepView {
    /// "Step 2 of 3"
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.step_index + 1, self.total_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::settings::DemoSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    fn open(module: &str) -> (DemoSimulation<StdRng>, Instant) {
        let t0 = Instant::now();
        let sim = DemoSimulation::with_rng(
            Catalog::builtin(),
            module,
            "IB Commerce",
            &DemoSettings::default(),
            t0,
            StdRng::seed_from_u64(3),
        );
        (sim, t0)
    }

    #[test]
    fn test_view_before_first_tick_shows_bases() {
        let (sim, _) = open("commerce");
        let view = sim.view();
        assert_eq!(view.title, "Order Orchestration");
        assert_eq!(view.progress_label(), "Step 1 of 3");
        assert_eq!(view.metrics[0].display, "847");
        assert_eq!(view.metrics[1].display, "98.2%");
        assert_eq!(view.metrics[2].tone, TrendTone::Positive);
        assert!(view.is_running);
        assert!(!view.is_last_step);
    }

    #[test]
    fn test_view_after_tick() {
        let (mut sim, t0) = open("commerce");
        sim.poll(t0 + Duration::from_millis(1_500));
        let view = sim.view();
        let orders: i64 = view.metrics[0].display.parse().unwrap();
        assert!((826..=868).contains(&orders));
        // Text metrics never show the jittered number.
        assert_eq!(view.metrics[1].display, "98.2%");
    }

    #[test]
    fn test_view_finance_trends() {
        let (sim, _) = open("finance");
        let view = sim.view();
        let dso = &view.metrics[0];
        assert_eq!(dso.label, "DSO");
        assert_eq!(dso.display, "28 days");
        assert_eq!(dso.tone, TrendTone::Positive);
        assert_eq!(view.metrics[2].tone, TrendTone::Negative);
        assert_eq!(
            view.step_titles,
            vec!["Accounts Receivable", "Cash Flow Forecasting", "Financial Close"]
        );
    }
}

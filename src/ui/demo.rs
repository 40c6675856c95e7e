//! Module launcher hosting the guided "try before you buy" demo.

use super::theme;
use crate::cli::DemoOptions;
use demo_engine::{Catalog, DemoModal, MetricView, StepView, TrendTone};
use gpui::{
    div, prelude::*, px, rgb, white, App, Context, Entity, FocusHandle, Focusable, IntoElement,
    MouseButton, MouseDownEvent, Render, Window,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

const MAX_LOG_MESSAGES: usize = 15;

type EventLog = Rc<RefCell<VecDeque<String>>>;

fn push_log(log: &EventLog, message: String) {
    let mut log = log.borrow_mut();
    log.push_front(message);
    if log.len() > MAX_LOG_MESSAGES {
        log.pop_back();
    }
}

fn tone_color(tone: TrendTone) -> u32 {
    match tone {
        TrendTone::Positive => theme::TREND_POSITIVE,
        TrendTone::Negative => theme::TREND_NEGATIVE,
        TrendTone::Neutral => theme::TREND_NEUTRAL,
    }
}

/// Activated module keys, in activation order, without repeats.
fn record_activation(activated: &mut Vec<String>, key: String) {
    if !activated.contains(&key) {
        activated.push(key);
    }
}

fn activation_summary(catalog: &Catalog, activated: &[String]) -> String {
    if activated.is_empty() {
        return "No module activated yet.".to_string();
    }
    let labels: Vec<&str> = activated.iter().map(|key| catalog.label(key)).collect();
    format!("Activated: {}", labels.join(", "))
}

pub struct TryBeforeBuyDemo {
    focus_handle: FocusHandle,
    catalog: Arc<Catalog>,
    modal: DemoModal,
    selected_module: Option<String>,
    activated: Vec<String>,
    log_messages: EventLog,
}

impl Focusable for TryBeforeBuyDemo {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl TryBeforeBuyDemo {
    pub fn new(cx: &mut App, options: DemoOptions) -> Entity<Self> {
        cx.new(|cx| {
            let log_messages: EventLog = Rc::new(RefCell::new(VecDeque::new()));
            let catalog = options.catalog.clone();
            let default_key = catalog.default_module().to_string();

            let close_log = log_messages.clone();
            let proceed_log = log_messages.clone();
            let modal = DemoModal::new(
                catalog.clone(),
                options.settings.clone(),
                &default_key,
                catalog.label(&default_key),
            )
            .on_close(move || push_log(&close_log, "Demo closed".to_string()))
            .on_proceed(move || push_log(&proceed_log, "Activation requested".to_string()));

            let mut demo = Self {
                focus_handle: cx.focus_handle(),
                catalog,
                modal,
                selected_module: None,
                activated: Vec::new(),
                log_messages,
            };

            demo.log("Welcome to the IB Commerce guided demo!");
            match options.module {
                Some(module) => demo.open_module(&module, options.name.as_deref()),
                None => demo.log("Pick a module to start its walkthrough."),
            }
            demo
        })
    }

    fn log(&mut self, message: &str) {
        push_log(&self.log_messages, message.to_string());
    }

    fn open_module(&mut self, module_type: &str, display_name: Option<&str>) {
        let now = Instant::now();
        let name = display_name
            .unwrap_or_else(|| self.catalog.label(module_type))
            .to_string();
        self.modal.set_module(module_type, &name, now);
        self.modal.set_open(true, now);

        // The modal may have fallen back to the default module.
        let resolved = self
            .modal
            .simulation()
            .map(|sim| sim.module_key().to_string())
            .unwrap_or_else(|| module_type.to_string());
        tracing::debug!(requested = module_type, resolved = %resolved, "opening demo");
        self.log(&format!("Opened demo: {}", name));
        self.selected_module = Some(resolved);
    }

    fn proceed(&mut self) {
        if let Some(key) = self.modal.activate(Instant::now()) {
            let label = self.catalog.label(&key).to_string();
            self.log(&format!("{} queued for activation", label));
            record_activation(&mut self.activated, key);
            self.selected_module = None;
        }
    }

    fn close_modal(&mut self) {
        self.modal.close();
        self.selected_module = None;
    }

    fn render_module_selector(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let keys: Vec<String> = self.catalog.module_keys().map(str::to_string).collect();

        div()
            .flex()
            .flex_row()
            .gap_2()
            .flex_wrap()
            .children(keys.into_iter().map(|key| {
                let is_current = self.selected_module.as_deref() == Some(key.as_str());
                let is_activated = self.activated.contains(&key);
                let label = self.catalog.label(&key).to_string();

                div()
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .bg(rgb(if is_current {
                        theme::BLUE_ACCENT
                    } else if is_activated {
                        theme::GREEN_BUTTON
                    } else {
                        theme::BUTTON_BACKGROUND
                    }))
                    .cursor_pointer()
                    .hover(|s| {
                        s.bg(rgb(if is_current {
                            theme::BLUE_ACCENT_HOVER
                        } else if is_activated {
                            theme::GREEN_BUTTON_HOVER
                        } else {
                            theme::HOVER_COLOR
                        }))
                    })
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(
                            move |this, _: &MouseDownEvent, _: &mut Window, cx: &mut Context<Self>| {
                                this.open_module(&key, None);
                                cx.notify();
                            },
                        ),
                    )
                    .child(
                        div()
                            .flex()
                            .flex_row()
                            .gap_2()
                            .items_center()
                            .child(div().text_xs().text_color(white()).child(label))
                            .when(is_activated, |d| d.child(div().text_xs().child("Activated")))
                            .when(is_current && self.modal.is_open(), |d| {
                                d.child(div().text_xs().child("Live"))
                            }),
                    )
            }))
    }

    fn render_metric_card(&self, metric: &MetricView) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .p_3()
            .min_w(px(180.))
            .bg(rgb(theme::PANEL_BACKGROUND))
            .border_1()
            .border_color(rgb(theme::BORDER_COLOR))
            .rounded_lg()
            .child(
                div()
                    .text_xs()
                    .text_color(rgb(theme::MUTED_TEXT))
                    .child(metric.label.clone()),
            )
            .child(
                div()
                    .text_xl()
                    .font_weight(gpui::FontWeight::BOLD)
                    .child(metric.display.clone()),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(rgb(tone_color(metric.tone)))
                    .child(metric.trend.clone()),
            )
    }

    fn render_step_tabs(&self, view: &StepView, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_row()
            .gap_2()
            .children(view.step_titles.iter().enumerate().map(|(idx, title)| {
                let is_current = idx == view.step_index;
                let is_done = idx < view.step_index;

                div()
                    .px_2()
                    .py_1()
                    .rounded_md()
                    .bg(rgb(if is_current {
                        theme::BLUE_ACCENT
                    } else if is_done {
                        theme::GREEN_BUTTON
                    } else {
                        theme::BUTTON_BACKGROUND
                    }))
                    .cursor_pointer()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(
                            move |this, _: &MouseDownEvent, _: &mut Window, cx: &mut Context<Self>| {
                                if let Some(sim) = this.modal.simulation_mut() {
                                    sim.jump_to_step(idx, Instant::now());
                                }
                                cx.notify();
                            },
                        ),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(white())
                            .child(format!("{}. {}", idx + 1, title)),
                    )
            }))
    }

    fn render_button(
        &self,
        label: String,
        color: u32,
        hover: u32,
        cx: &mut Context<Self>,
        on_click: impl Fn(&mut Self) + 'static,
    ) -> impl IntoElement {
        div()
            .px_3()
            .py_1()
            .rounded_md()
            .bg(rgb(color))
            .cursor_pointer()
            .hover(move |s| s.bg(rgb(hover)))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(
                    move |this, _: &MouseDownEvent, _: &mut Window, cx: &mut Context<Self>| {
                        on_click(this);
                        cx.notify();
                    },
                ),
            )
            .child(div().text_sm().text_color(white()).child(label))
    }

    fn render_modal(&self, view: StepView, cx: &mut Context<Self>) -> impl IntoElement {
        let advance_button = if view.is_last_step {
            self.render_button(
                format!("Activate {}", view.module_name),
                theme::GREEN_BUTTON,
                theme::GREEN_BUTTON_HOVER,
                cx,
                |this| this.proceed(),
            )
            .into_any_element()
        } else {
            self.render_button(
                "Next".to_string(),
                theme::BLUE_ACCENT,
                theme::BLUE_ACCENT_HOVER,
                cx,
                |this| {
                    if let Some(sim) = this.modal.simulation_mut() {
                        sim.advance_to_next(Instant::now());
                    }
                },
            )
            .into_any_element()
        };

        div()
            .flex()
            .flex_col()
            .gap_3()
            .p_4()
            .bg(rgb(theme::HEADER_BACKGROUND))
            .border_1()
            .border_color(rgb(theme::BORDER_COLOR))
            .rounded_lg()
            .child(
                // Header
                div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .gap_1()
                            .child(
                                div()
                                    .text_lg()
                                    .font_weight(gpui::FontWeight::BOLD)
                                    .child(format!("Try {} live", view.module_name)),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(rgb(theme::MUTED_TEXT))
                                    .child(view.progress_label()),
                            ),
                    )
                    .child(self.render_button(
                        "Close".to_string(),
                        theme::BUTTON_BACKGROUND,
                        theme::HOVER_COLOR,
                        cx,
                        |this| this.close_modal(),
                    )),
            )
            .child(self.render_step_tabs(&view, cx))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(
                        div()
                            .text_base()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(rgb(theme::STEP_TITLE))
                            .child(view.title.clone()),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(theme::TEXT_COLOR))
                            .child(view.description.clone()),
                    ),
            )
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap_3()
                    .flex_wrap()
                    .children(view.metrics.iter().map(|m| self.render_metric_card(m))),
            )
            .child(
                // Controls
                div()
                    .flex()
                    .flex_row()
                    .gap_2()
                    .child(self.render_button(
                        "Previous".to_string(),
                        theme::BUTTON_BACKGROUND,
                        theme::HOVER_COLOR,
                        cx,
                        |this| {
                            if let Some(sim) = this.modal.simulation_mut() {
                                sim.go_to_previous(Instant::now());
                            }
                        },
                    ))
                    .child(self.render_button(
                        if view.is_running { "Pause" } else { "Resume" }.to_string(),
                        if view.is_running { theme::RED_BUTTON } else { theme::GREEN_BUTTON },
                        if view.is_running {
                            theme::RED_BUTTON_HOVER
                        } else {
                            theme::GREEN_BUTTON_HOVER
                        },
                        cx,
                        |this| {
                            if let Some(sim) = this.modal.simulation_mut() {
                                let running = sim.toggle_running(Instant::now());
                                this.log(if running { "Demo resumed" } else { "Demo paused" });
                            }
                        },
                    ))
                    .child(advance_button),
            )
    }
}

impl Render for TryBeforeBuyDemo {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let outcome = self.modal.poll(Instant::now());
        if outcome.advanced {
            if let Some(view) = self.modal.view() {
                self.log(&format!("Auto-advanced to: {}", view.title));
            }
        }

        if self.modal.simulation().is_some_and(|sim| sim.is_running()) {
            cx.notify();
        }

        let modal_view = self.modal.view();
        let log_messages: Vec<String> = self.log_messages.borrow().iter().cloned().collect();

        div()
            .id("main-scroll-container")
            .flex()
            .flex_col()
            .size_full()
            .overflow_y_scroll()
            .bg(rgb(theme::BACKGROUND))
            .text_color(rgb(theme::TEXT_COLOR))
            .p_4()
            .gap_4()
            .child(
                // Header
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .pb_3()
                    .border_b_1()
                    .border_color(rgb(theme::BORDER_COLOR))
                    .child(
                        div()
                            .text_xl()
                            .font_weight(gpui::FontWeight::BOLD)
                            .child("IB Commerce"),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(rgb(theme::MUTED_TEXT))
                            .child("Try any module before you activate it"),
                    ),
            )
            .child(self.render_module_selector(cx))
            .when_some(modal_view, |d, view| d.child(self.render_modal(view, cx)))
            .when(!self.modal.is_open(), |d| {
                d.child(
                    div()
                        .p_3()
                        .bg(rgb(theme::PANEL_BACKGROUND))
                        .rounded_md()
                        .text_sm()
                        .text_color(rgb(theme::TEXT_COLOR_SECONDARY))
                        .child(activation_summary(&self.catalog, &self.activated)),
                )
            })
            .child(
                // Log
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .p_3()
                    .bg(rgb(theme::BACKGROUND))
                    .rounded_md()
                    .max_h(px(200.))
                    .child(div().text_sm().font_weight(gpui::FontWeight::SEMIBOLD).child("Event Log:"))
                    .children(log_messages.into_iter().map(|msg| {
                        div().text_xs().text_color(rgb(theme::TEXT_COLOR_SECONDARY)).child(msg)
                    })),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_tracks_keys_not_display_names() {
        let catalog = Catalog::builtin();
        let mut activated = Vec::new();
        record_activation(&mut activated, "finance".to_string());
        record_activation(&mut activated, "finance".to_string());
        assert_eq!(activated, vec!["finance"]);
        assert_eq!(activation_summary(catalog, &activated), "Activated: IB Finance");
    }

    #[test]
    fn test_activation_summary_empty() {
        assert_eq!(
            activation_summary(Catalog::builtin(), &[]),
            "No module activated yet."
        );
    }
}

use super::{monitor_error::MonitorError, recipe_config::recipe_from_config};
use crate::{
    config::Config,
    connection::ConnectionState,
    listener::ListenerConfig,
    log::{LogSink, Logger},
    matcher::{GestureMatcher, MatchEvent, Recipe, RecipeProgress},
    read_model::ReadSnapshot,
    receiver::GestureReceiver,
    sink_error, sink_info, sink_warn,
};
use eframe::{App, Frame, egui};
use std::{collections::VecDeque, sync::Arc, time::Duration};

const MAX_UI_LOGS: usize = 256;
const REPAINT_EVERY: Duration = Duration::from_millis(16);

/// Window that drives the receiver the way the game did: one poll per frame.
pub struct MonitorApp {
    listener_config: ListenerConfig,
    logger: Logger,
    sink: Arc<dyn LogSink>,

    receiver: Option<GestureReceiver>,
    matcher: Option<GestureMatcher>,
    recipe: Recipe,
    last_snapshot: ReadSnapshot,
    hold_progress: f32,

    status_line: String,
    ui_logs: VecDeque<String>,
}

impl MonitorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Arc<Config>) -> Self {
        let logger = Logger::start_with_config(4096, 256, 10, &config);
        let sink: Arc<dyn LogSink> = Arc::new(logger.handle());

        let (listener_config, status_line) = match ListenerConfig::from_config(&config) {
            Ok(cfg) => (cfg, "Ready.".to_string()),
            Err(e) => {
                sink_warn!(sink, "[App] {e}; using default listener settings");
                (ListenerConfig::default(), format!("Config error: {e}. Using defaults."))
            }
        };
        let recipe = recipe_from_config(&config);

        Self {
            listener_config,
            logger,
            sink,
            receiver: None,
            matcher: None,
            recipe,
            last_snapshot: ReadSnapshot::default(),
            hold_progress: 0.0,
            status_line,
            ui_logs: VecDeque::with_capacity(MAX_UI_LOGS),
        }
    }

    fn push_log<T: Into<String>>(&mut self, s: T) {
        if self.ui_logs.len() == MAX_UI_LOGS {
            self.ui_logs.pop_front();
        }
        self.ui_logs.push_back(s.into());
    }

    fn start_receiver(&mut self) -> Result<(), MonitorError> {
        let receiver = GestureReceiver::start(self.listener_config.clone(), Arc::clone(&self.sink))?;
        let mut matcher = GestureMatcher::new(receiver.read_model());
        matcher.set_active(true);

        self.status_line = format!("Listening on {}", receiver.local_addr());
        self.recipe.reset();
        self.hold_progress = 0.0;
        self.receiver = Some(receiver);
        self.matcher = Some(matcher);
        Ok(())
    }

    fn stop_receiver(&mut self) {
        self.matcher = None;
        if let Some(receiver) = self.receiver.take() {
            receiver.stop();
            self.last_snapshot = receiver.snapshot();
        }
        self.hold_progress = 0.0;
        self.status_line = "Stopped.".into();
    }

    fn poll(&mut self, dt: Duration) {
        if let Some(receiver) = &self.receiver {
            self.last_snapshot = receiver.snapshot();
        }

        let Some(matcher) = self.matcher.as_mut() else {
            return;
        };
        let Some(expected) = self.recipe.current_ingredient().map(str::to_owned) else {
            return;
        };

        match matcher.tick(&expected, self.recipe.required_hold, dt) {
            MatchEvent::Filling { progress } => self.hold_progress = progress,
            MatchEvent::Completed => {
                self.hold_progress = 0.0;
                match self.recipe.advance() {
                    RecipeProgress::Next(_) => {
                        sink_info!(self.sink, "[App] {expected} brewed");
                    }
                    RecipeProgress::Complete => {
                        sink_info!(self.sink, "[App] {} complete", self.recipe.name);
                        self.status_line = format!("{} brewed!", self.recipe.name);
                        self.recipe.reset();
                    }
                }
            }
            MatchEvent::Failed => {
                self.hold_progress = 0.0;
                sink_warn!(self.sink, "[App] gesture catching failed on {expected}");
            }
            MatchEvent::Idle | MatchEvent::Inactive => self.hold_progress = 0.0,
        }
    }

    fn drain_logs(&mut self) {
        while let Some(line) = self.logger.try_recv_ui() {
            self.push_log(line);
        }
    }
}

fn state_color(state: ConnectionState) -> egui::Color32 {
    match state {
        ConnectionState::Connected => egui::Color32::GREEN,
        ConnectionState::Disconnected => egui::Color32::RED,
        ConnectionState::Waiting => egui::Color32::WHITE,
    }
}

impl App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.poll(Duration::try_from_secs_f32(dt).unwrap_or(Duration::ZERO));
        self.drain_logs();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Wand Monitor");
                ui.add_space(10.);
            });

            ui.separator();
            ui.horizontal(|ui| {
                let running = self.receiver.is_some();
                if ui
                    .add_enabled(!running, egui::Button::new("Start"))
                    .clicked()
                {
                    if let Err(e) = self.start_receiver() {
                        self.status_line = format!("Start failed: {e}");
                        sink_error!(self.sink, "[App] start failed: {e}");
                    }
                }
                if ui.add_enabled(running, egui::Button::new("Stop")).clicked() {
                    self.stop_receiver();
                }
                ui.label(format!(
                    "{}:{} ({})",
                    self.listener_config.bind_addr,
                    self.listener_config.port,
                    self.listener_config.wire_format
                ));
            });

            ui.separator();
            let snap = &self.last_snapshot;
            egui::Grid::new("feed").num_columns(2).show(ui, |ui| {
                ui.label("Gesture:");
                ui.monospace(if snap.has_received() { snap.sample.label() } else { "-" });
                ui.end_row();

                ui.label("Confidence:");
                ui.monospace(format!("{:.1}%", snap.sample.confidence()));
                ui.end_row();

                ui.label("Connection:");
                ui.colored_label(state_color(snap.state), snap.state.label());
                ui.end_row();
            });
            if let Some(receiver) = &self.receiver {
                let stats = receiver.stats();
                ui.label(format!(
                    "Datagrams: {} received, {} rejected",
                    stats.received, stats.rejected
                ));
            }

            ui.separator();
            ui.label(format!(
                "Recipe: {} ({} of {})",
                self.recipe.name,
                self.recipe.current_index() + 1,
                self.recipe.ingredients.len()
            ));
            ui.label(format!(
                "Next ingredient: {}",
                self.recipe.current_ingredient().unwrap_or("-")
            ));
            ui.add(egui::ProgressBar::new(self.hold_progress).show_percentage());

            ui.separator();
            ui.label("Logs:");
            egui::ScrollArea::vertical()
                .max_height(220.)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.ui_logs {
                        ui.monospace(line);
                    }
                });

            ui.separator();
            ui.label(&self.status_line);
        });

        ctx.request_repaint_after(REPAINT_EVERY);
    }
}

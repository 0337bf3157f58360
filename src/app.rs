use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::data::loader::{self, LoadError};
use crate::state::app_state::AppConfig;
use crate::state::chart::Chart;
use crate::state::record::Dataset;
use crate::ui::chart_panel;

type LoadSlot = Arc<Mutex<Option<Result<Dataset, LoadError>>>>;

/// Pending async dataset load.
struct PendingLoad {
    path: PathBuf,
    result: LoadSlot,
}

/// The census scatter application.
pub struct CensusPlotApp {
    config: AppConfig,
    chart: Option<Chart>,
    /// Last load or render failure, shown in place of (or below) the chart.
    error_message: Option<String>,
    pending_load: Option<PendingLoad>,
}

impl CensusPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(config.theme.visuals());

        let data_path = config.data_path.clone();
        let mut app = Self {
            config,
            chart: None,
            error_message: None,
            pending_load: None,
        };
        app.load_file(data_path);
        app
    }

    /// Parse a data file on a worker thread; nothing is drawn until it lands.
    fn load_file(&mut self, path: PathBuf) {
        tracing::info!("Loading census data from {:?}", path);
        let result: LoadSlot = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);
        let path_clone = path.clone();

        std::thread::spawn(move || {
            let loaded = loader::load_census(&path_clone);
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(loaded);
            }
        });

        self.pending_load = Some(PendingLoad { path, result });
    }

    fn poll_pending_load(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_load else {
            return;
        };

        let finished = match pending.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(result) = finished else {
            ctx.request_repaint();
            return;
        };
        let path = pending.path.clone();
        self.pending_load = None;

        let layout = self.config.layout.clone();
        match result.and_then(|ds| Chart::new(ds, layout).map_err(LoadError::from)) {
            Ok(chart) => {
                self.chart = Some(chart);
                self.error_message = None;
            }
            Err(e) => {
                tracing::error!("Failed to load {:?}: {e}", path);
                self.error_message = Some(format!("Failed to load {}: {e}", path.display()));
            }
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(path);
        }
    }

    fn dropped_csv(ctx: &egui::Context) -> Option<PathBuf> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .find(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
                })
        })
    }
}

impl eframe::App for CensusPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending_load(ctx);

        if let Some(path) = Self::dropped_csv(ctx) {
            self.load_file(path);
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::O)) {
            self.open_file_dialog();
        }

        let now = ctx.input(|i| i.time);
        let theme = self.config.theme;

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(0)))
            .show(ctx, |ui| {
                if let Some(chart) = &mut self.chart {
                    let events = chart_panel::show_chart(chart, ui, &theme, now);
                    for event in events {
                        if let Err(e) = chart.handle(event, now) {
                            tracing::error!("Cannot apply {event:?}: {e}");
                            self.error_message = Some(e.to_string());
                        }
                    }
                    if chart.is_animating(now) {
                        ctx.request_repaint();
                    }
                } else if self.pending_load.is_some() {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new("Loading census data...").weak());
                    });
                }

                if let Some(msg) = &self.error_message {
                    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), msg);
                }
            });
    }
}

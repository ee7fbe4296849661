//! Live trajectory viewer
//!
//! Plots concentration curves while the simulation advances and reloads the
//! task file whenever it changes on disk.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use rxnsim_core::{
    build_simulation_context_from_source, current_concentrations, step_simulation, Diagnostics,
    SimulationContext,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

const PALETTE: [egui::Color32; 8] = [
    egui::Color32::from_rgb(31, 119, 180),
    egui::Color32::from_rgb(255, 127, 14),
    egui::Color32::from_rgb(44, 160, 44),
    egui::Color32::from_rgb(214, 39, 40),
    egui::Color32::from_rgb(148, 103, 189),
    egui::Color32::from_rgb(140, 86, 75),
    egui::Color32::from_rgb(227, 119, 194),
    egui::Color32::from_rgb(188, 189, 34),
];

/// Most points drawn per curve
const MAX_PLOT_POINTS: usize = 2000;

pub fn run_viewer(source_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "rxnsim viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(source_path, cc)))),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;
    Ok(())
}

/// Viewer state
pub struct ViewerApp {
    source_path: PathBuf,
    source_text: String,
    ctx_opt: Option<SimulationContext>,
    listing: Vec<String>,
    diagnostics: Diagnostics,
    last_load_error: Option<String>,
    playing: bool,
    speed_multiplier: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl ViewerApp {
    pub fn new(source_path: PathBuf, _cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let Some(ref mut w) = watcher {
            if let Err(e) = w.watch(&source_path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", source_path.display(), e);
            }
        }

        let mut app = Self {
            source_path,
            source_text: String::new(),
            ctx_opt: None,
            listing: Vec::new(),
            diagnostics: Diagnostics::new(),
            last_load_error: None,
            playing: false,
            speed_multiplier: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        };

        app.reload_from_disk();
        app
    }

    fn reload_from_disk(&mut self) {
        match read_source(&self.source_path) {
            Ok(text) => {
                self.source_text = text;
                self.reload_context();
            }
            Err(e) => self.clear_with_error(e),
        }
    }

    fn clear_with_error(&mut self, error: String) {
        self.last_load_error = Some(error);
        self.ctx_opt = None;
        self.listing.clear();
        self.diagnostics = Diagnostics::new();
        self.playing = false;
    }

    fn reload_context(&mut self) {
        match build_simulation_context_from_source(&self.source_text) {
            Ok((ctx, listing, diagnostics)) => {
                self.ctx_opt = Some(ctx);
                self.listing = listing;
                self.diagnostics = diagnostics;
                self.last_load_error = None;
            }
            Err(e) => self.clear_with_error(e.to_string()),
        }
    }

    fn check_file_changes(&mut self) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if paths.iter().any(|p| p.ends_with(&self.source_path)) {
                        self.needs_reload = true;
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if self.needs_reload {
            log::info!("reloading {}", self.source_path.display());
            self.reload_from_disk();
            self.needs_reload = false;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }

            if ui.button("⏮ Reset").clicked() {
                self.reload_from_disk();
                self.playing = false;
            }

            if ui.button("⏭ Step").clicked() {
                if let Some(ref mut ctx) = self.ctx_opt {
                    step_simulation(ctx);
                }
            }

            ui.separator();
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.speed_multiplier, 1.0..=500.0).logarithmic(true));

            ui.separator();
            if let Some(ref ctx) = self.ctx_opt {
                let t = ctx.trajectory.time.last().copied().unwrap_or(0.0);
                ui.label(format!(
                    "Step: {} / {}   t = {:.3}",
                    ctx.current_step, ctx.max_steps, t
                ));
            }
        });
    }

    fn side_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Reactions");
        for line in &self.listing {
            ui.monospace(line);
        }

        if let Some(ref ctx) = self.ctx_opt {
            ui.separator();
            ui.heading("Concentrations");
            for (i, species) in current_concentrations(ctx).iter().enumerate() {
                ui.label(
                    egui::RichText::new(format!("[{}] = {:.4}", species.id, species.concentration))
                        .color(PALETTE[i % PALETTE.len()]),
                );
            }
        }

        if !self.diagnostics.is_empty() {
            ui.separator();
            ui.heading("Diagnostics");
            for diagnostic in self.diagnostics.iter() {
                ui.label(egui::RichText::new(diagnostic.to_string()).color(egui::Color32::YELLOW));
            }
        }
    }

    fn plot(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect.shrink(40.0);

        let Some(ref ctx) = self.ctx_opt else {
            return;
        };
        let trajectory = &ctx.trajectory;

        let t_max = ctx.params.t_max.max(f64::EPSILON);
        let c_max = trajectory
            .concentrations
            .iter()
            .flat_map(|series| series.iter().copied())
            .fold(0.0_f64, f64::max)
            .max(f64::EPSILON);

        let to_screen = |t: f64, c: f64| {
            egui::pos2(
                rect.left() + (t / t_max) as f32 * rect.width(),
                rect.bottom() - (c / c_max) as f32 * rect.height(),
            )
        };

        let axis = egui::Stroke::new(1.0, egui::Color32::GRAY);
        painter.line_segment([rect.left_bottom(), rect.right_bottom()], axis);
        painter.line_segment([rect.left_bottom(), rect.left_top()], axis);
        painter.text(
            rect.right_bottom() + egui::vec2(0.0, 6.0),
            egui::Align2::RIGHT_TOP,
            format!("{}", ctx.params.t_max),
            egui::FontId::default(),
            egui::Color32::GRAY,
        );
        painter.text(
            rect.left_top() - egui::vec2(6.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            format!("{:.3}", c_max),
            egui::FontId::default(),
            egui::Color32::GRAY,
        );

        let stride = (trajectory.len() / MAX_PLOT_POINTS).max(1);
        for (i, (species, series)) in trajectory
            .species
            .iter()
            .zip(&trajectory.concentrations)
            .enumerate()
        {
            let color = PALETTE[i % PALETTE.len()];
            let points: Vec<egui::Pos2> = trajectory
                .time
                .iter()
                .zip(series)
                .step_by(stride)
                .map(|(&t, &c)| to_screen(t, c))
                .collect();
            if points.len() > 1 {
                painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));
            }

            painter.text(
                rect.right_top() + egui::vec2(-8.0, 16.0 * i as f32),
                egui::Align2::RIGHT_TOP,
                format!("[{}]", species),
                egui::FontId::default(),
                color,
            );
        }
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::SidePanel::right("reactions")
            .min_width(260.0)
            .show(ctx, |ui| self.side_panel(ui));

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| self.plot(ui));

        if self.playing {
            if let Some(ref mut sim) = self.ctx_opt {
                let steps_per_frame = self.speed_multiplier.max(1.0).round() as usize;
                for _ in 0..steps_per_frame {
                    if step_simulation(sim) {
                        self.playing = false;
                        break;
                    }
                }
            }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_task_file_reports_io_error() {
        let path = Path::new("no/such/dir/task.rxn");
        let err = read_source(path).unwrap_err();
        assert!(err.starts_with("cannot read no/such/dir/task.rxn: "), "{}", err);
        assert!(!err.contains("simulate"));
    }

    #[test]
    fn readable_task_file_is_returned_verbatim() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../rxnsim-core/tests/integration/data/decay.rxn");
        let text = read_source(&path).unwrap();
        assert!(text.contains("simulate dt = 0.001 t_max = 5"));
    }
}

// ui.rs - egui front end driving a Session

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Sense, ViewportCommand};
use torus_life::{Command, PATTERNS, Session};
use tracing::{info, warn};

use crate::layout::BoardLayout;
use crate::palette;

pub struct LifeApp {
    session: Session,
    cell_size: f32,
    selected_pattern: usize,
    last_update: Instant,
}

impl LifeApp {
    pub fn new(session: Session, cell_size: f32) -> Self {
        Self {
            session,
            cell_size,
            selected_pattern: 0,
            last_update: Instant::now(),
        }
    }

    fn issue(&mut self, command: Command) {
        if let Err(err) = self.session.apply(command) {
            warn!(?command, %err, "command rejected");
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Randomize").clicked() {
                self.issue(Command::Randomize);
            }
            if ui.button("Clear").clicked() {
                self.issue(Command::Clear);
            }
            if ui.button("Next").clicked() {
                self.issue(Command::Next);
            }
            if ui.button("Start").clicked() {
                self.issue(Command::Start);
                self.last_update = Instant::now();
            }
            if ui.button("Stop").clicked() {
                self.issue(Command::Stop);
            }
            if ui.button("Exit").clicked() {
                self.issue(Command::Exit);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
                    self.issue(Command::Stamp(pattern));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let delay = self.session.delay().as_secs_f32();
            let mut speed = if delay > 0.0 { (1.0 / delay).min(90.0) } else { 90.0 };
            if ui
                .add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec"))
                .changed()
            {
                self.session.set_delay(Duration::from_secs_f32(1.0 / speed));
            }

            ui.separator();
            ui.label(format!("Generation: {}", self.session.generation()));
            if self.session.cycle_detected() {
                ui.colored_label(Color32::YELLOW, "cycle");
            }
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let size = self.session.grid().size();
        let side = self.cell_size * size as f32;
        let (response, painter) = ui.allocate_painter(egui::Vec2::splat(side), Sense::click());
        let layout = BoardLayout::new(response.rect.min, size, self.cell_size);

        painter.rect_filled(layout.board_rect(), 0.0, palette::BOARD);

        let grid = self.session.grid();
        let radius = layout.cell_radius();
        for (row, col) in grid.live_cells() {
            let neighbors = grid.neighbor_count(row, col).unwrap_or_default();
            let centre = layout.cell_rect(row, col).center();
            painter.circle_filled(centre, radius, palette::alive_color(neighbors));
        }

        if response.clicked() {
            if let Some((row, col)) = response.interact_pointer_pos().and_then(|pos| layout.cell_at(pos)) {
                self.issue(Command::Toggle { row, col });
            }
        }
    }

    fn stats(&self, ui: &mut egui::Ui) {
        let grid = self.session.grid();
        let total = grid.size() * grid.size();
        let live = grid.population();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.is_running() && self.last_update.elapsed() >= self.session.delay() {
            self.session.tick();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui);
            ui.separator();
            egui::ScrollArea::both().show(ui, |ui| self.board(ui));
            ui.separator();
            self.stats(ui);
        });

        if self.session.should_exit() {
            info!(generation = self.session.generation(), "exit requested");
            ctx.send_viewport_cmd(ViewportCommand::Close);
        } else if self.session.is_running() {
            ctx.request_repaint_after(self.session.delay());
        }
    }
}

/// Opens the window and blocks until it closes.
pub fn run(session: Session, cell_size: f32) -> Result<(), eframe::Error> {
    let side = cell_size * session.grid().size() as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(side + 40.0).max(640.0), side + 140.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(session, cell_size))),
    )
}

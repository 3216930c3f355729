use eframe::egui::{self, Align, Color32, Context, Layout, RichText, Ui, Vec2};

use crate::lsdb::NodeKind;

use super::super::graph::build_scene;
use super::super::selection::SelectionController;
use super::super::{LoadedData, Tab, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(data: LoadedData) -> Self {
        let scene = build_scene(&data.snapshot.graph);
        Self {
            scene,
            snapshot: data.snapshot,
            log: data.log,
            tab: Tab::Topology,
            sim: None,
            selection: SelectionController::new(),
            inspection: None,
            drag_node: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_reloading: bool,
        refresh_error: Option<&str>,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("lsdbscope");
                    ui.separator();
                    ui.label(format!("snapshot: {}", self.snapshot.timestamp));
                    ui.label(format!("nodes: {}", self.snapshot.graph.node_count()));
                    ui.label(format!("links: {}", self.snapshot.graph.link_count()));
                    ui.label(format!("routers: {}", self.snapshot.adjacencies.len()));

                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(error) = refresh_error {
                            ui.colored_label(
                                Color32::from_rgb(230, 120, 100),
                                format!("refresh failed: {error}"),
                            )
                            .on_hover_text("showing the last good snapshot");
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, Tab::Topology, "Topology");
                    ui.selectable_value(&mut self.tab, Tab::Adjacency, "Adjacency");
                    ui.selectable_value(&mut self.tab, Tab::Log, "Log");
                    ui.separator();
                    ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("search nodes")
                            .desired_width(220.0),
                    );
                });
            });

        if self.tab == Tab::Topology {
            egui::SidePanel::right("node_info")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| self.draw_inspection(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Topology => self.draw_graph(ui),
            Tab::Adjacency => self.draw_adjacency(ui),
            Tab::Log => self.draw_log(ui),
        });
    }

    fn draw_inspection(&self, ui: &mut Ui) {
        ui.heading("Node info");
        ui.add_space(6.0);

        let Some(inspection) = &self.inspection else {
            ui.label("[click a node]");
            return;
        };

        ui.label(format!("Type: {}", inspection.kind.label()));
        let id_label = match inspection.kind {
            NodeKind::Network => "LSA ID",
            NodeKind::Router => "Router ID",
            NodeKind::Other(_) => "ID",
        };
        ui.label(format!("{id_label}: {}", inspection.display_name));

        ui.add_space(4.0);
        ui.label(RichText::new("Neighbors:").strong());
        if inspection.neighbors.is_empty() {
            ui.weak("none reported");
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for neighbor in &inspection.neighbors {
                    ui.label(neighbor);
                }
            });
    }
}

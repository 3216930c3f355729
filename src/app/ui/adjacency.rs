use eframe::egui::{self, Color32, RichText, Ui};

use crate::lsdb::NeighborKind;

use super::super::ViewModel;

const NET_CHIP: Color32 = Color32::from_rgb(0x3c, 0xb3, 0x7a);
const P2P_CHIP: Color32 = Color32::from_rgb(0x4a, 0x90, 0xd9);
const OTHER_CHIP: Color32 = Color32::from_rgb(0x8a, 0x8a, 0x8a);

fn chip_color(kind: &NeighborKind) -> Color32 {
    match kind {
        NeighborKind::Network => NET_CHIP,
        NeighborKind::P2p => P2P_CHIP,
        NeighborKind::Other(_) => OTHER_CHIP,
    }
}

impl ViewModel {
    /// The adjacency matrix: one row per reported router, one colored chip
    /// per neighbor.
    pub(in crate::app) fn draw_adjacency(&self, ui: &mut Ui) {
        ui.heading("Adjacency");
        ui.add_space(6.0);

        if self.snapshot.adjacencies.is_empty() {
            ui.label("The snapshot reports no router adjacencies.");
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("adjacency_grid")
                    .striped(true)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        for router in &self.snapshot.adjacencies {
                            ui.label(RichText::new(&router.router_id).strong().monospace());
                            ui.horizontal_wrapped(|ui| {
                                for neighbor in &router.neighbors {
                                    ui.label(
                                        RichText::new(format!(" {} ", neighbor.router_id))
                                            .monospace()
                                            .color(Color32::BLACK)
                                            .background_color(chip_color(&neighbor.kind)),
                                    );
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
    }
}

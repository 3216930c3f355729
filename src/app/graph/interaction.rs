use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;
use super::super::selection::{SelectionContext, SelectionEffect};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.left_top() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_node(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        (0..screen_positions.len())
            .filter_map(|index| {
                let distance = screen_positions[index].distance(pointer);
                // a small pick margin keeps the 4.5px network dots grabbable
                if distance <= screen_radii[index].max(6.0) {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Primary-button drag over the topology. Drag-start selects (or
    /// toggles) and pins; drag-move forwards the pointer to the pin;
    /// drag-end releases the pin and lets the simulation settle. Neither
    /// move nor end touches selection state.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<usize>,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let Some(index) = hovered else {
                return;
            };

            if let Some(sim) = &mut self.sim {
                sim.reheat();
            }
            let position = self.scene.nodes[index].world_pos;
            self.scene.pin(index, position);
            self.drag_node = Some(index);

            let effect = self.selection.drag_start(
                index,
                SelectionContext {
                    graph: &self.snapshot.graph,
                    adjacencies: &self.snapshot.adjacencies,
                },
            );
            self.inspection = match effect {
                SelectionEffect::Cleared => None,
                SelectionEffect::Inspected(inspection) => Some(inspection),
            };
        } else if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(index) = self.drag_node
                && let Some(pointer) = response.interact_pointer_pos()
            {
                let world = screen_to_world(rect, self.pan, self.zoom, pointer);
                self.scene.pin(index, world);
            }
        } else if response.drag_stopped_by(egui::PointerButton::Primary) {
            if let Some(index) = self.drag_node.take() {
                self.scene.unpin(index);
                if let Some(sim) = &mut self.sim {
                    sim.cool();
                }
            }
        }
    }
}

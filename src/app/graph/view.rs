use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::physics::Simulation;
use super::super::render_utils::{circle_visible, world_to_screen};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(140, 150, 160, 200);
const NODE_STROKE: Color32 = Color32::from_rgba_premultiplied(15, 15, 15, 190);
const MATCH_RING: Color32 = Color32::from_rgb(103, 196, 255);
const LABEL_COLOR: Color32 = Color32::from_gray(238);

fn fuzzy_match(matcher: &SkimMatcherV2, text: &str, query: &str) -> bool {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
        .is_some()
}

impl ViewModel {
    fn search_matches(&self) -> Option<HashSet<usize>> {
        if self.selection.selected().is_some() {
            return None;
        }

        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.snapshot
                .graph
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| fuzzy_match(&matcher, &node.name, query))
                .map(|(index, _)| index)
                .collect(),
        )
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        // viewport dimensions are read once, at simulation start
        if self.sim.is_none() {
            self.sim = Some(Simulation::new(rect.width(), rect.height()));
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let to_screen = |model: &Self, index: usize| {
            world_to_screen(
                rect,
                model.pan,
                model.zoom,
                model.scene.nodes[index].world_pos,
            )
        };
        let radius_scale = self.zoom.powf(0.4);

        // hover and drag act on the positions published by the last tick
        let screen_positions = (0..self.scene.nodes.len())
            .map(|index| to_screen(self, index))
            .collect::<Vec<_>>();
        let screen_radii = self
            .scene
            .nodes
            .iter()
            .enumerate()
            .map(|(index, _)| {
                let target = self
                    .selection
                    .target_radius(index, &self.snapshot.graph.nodes[index].kind);
                (target * radius_scale).clamp(2.0, 40.0)
            })
            .collect::<Vec<_>>();

        let hovered = if response.hovered() {
            Self::hovered_node(ui, &screen_positions, &screen_radii)
        } else {
            None
        };
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        // the drag callback completes before the next integration step
        // observes the pin
        self.handle_node_drag(rect, &response, hovered);

        let mut moving = false;
        if let Some(sim) = self.sim.as_mut() {
            moving = sim.step(&mut self.scene);
        }
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        let matches = self.search_matches();

        for &(source, target) in &self.scene.edges {
            painter.line_segment(
                [to_screen(self, source), to_screen(self, target)],
                Stroke::new(2.0, EDGE_COLOR),
            );
        }

        // radii are re-derived here so a selection made this frame already
        // paints with the enlarged radius
        for index in 0..self.scene.nodes.len() {
            let position = to_screen(self, index);
            let target = self
                .selection
                .target_radius(index, &self.snapshot.graph.nodes[index].kind);
            let radius = (target * radius_scale).clamp(2.0, 40.0);
            if !circle_visible(rect, position, radius + 4.0) {
                continue;
            }

            painter.circle_filled(position, radius, self.scene.nodes[index].fill);
            painter.circle_stroke(position, radius, Stroke::new(1.0, NODE_STROKE));

            if matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index))
            {
                painter.circle_stroke(position, radius + 3.0, Stroke::new(1.6, MATCH_RING));
            }

            let is_selected = self.selection.selected() == Some(index);
            if is_selected || hovered == Some(index) || self.zoom > 1.5 {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    &self.snapshot.graph.nodes[index].name,
                    FontId::proportional(12.0),
                    LABEL_COLOR,
                );
            }
        }

        if let Some(index) = hovered {
            let node = &self.snapshot.graph.nodes[index];
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}", node.name, node.kind.label()),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}

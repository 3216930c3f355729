use eframe::egui::{Color32, Pos2, Rect, Vec2};

use crate::lsdb::NodeKind;

/// Categorical palette for node kinds outside the recognized set. The
/// original viewer keyed it with a constant, collapsing every unrecognized
/// kind onto the same slot; preserved (see DESIGN.md).
const CATEGORY_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
];
const FALLBACK_SLOT: usize = 1;

const ROUTER_FILL: Color32 = Color32::from_rgb(0xe9, 0x54, 0x64);
const NETWORK_FILL: Color32 = Color32::from_rgb(0x3c, 0xb3, 0x7a);

const ROUTER_RADIUS: f32 = 7.0;
const NETWORK_RADIUS: f32 = 4.5;
const FALLBACK_RADIUS: f32 = 6.0;

pub(super) fn node_default_radius(kind: &NodeKind) -> f32 {
    match kind {
        NodeKind::Network => NETWORK_RADIUS,
        NodeKind::Router => ROUTER_RADIUS,
        NodeKind::Other(_) => FALLBACK_RADIUS,
    }
}

pub(super) fn node_default_fill(kind: &NodeKind) -> Color32 {
    match kind {
        NodeKind::Network => NETWORK_FILL,
        NodeKind::Router => ROUTER_FILL,
        NodeKind::Other(_) => CATEGORY_PALETTE[FALLBACK_SLOT],
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.left_top() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.left_top() - pan) / zoom
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn kind_derived_visual_defaults() {
        assert_eq!(node_default_radius(&NodeKind::Router), 7.0);
        assert_eq!(node_default_radius(&NodeKind::Network), 4.5);
        assert_eq!(
            node_default_fill(&NodeKind::Router),
            Color32::from_rgb(0xe9, 0x54, 0x64)
        );
        assert_eq!(
            node_default_fill(&NodeKind::Network),
            Color32::from_rgb(0x3c, 0xb3, 0x7a)
        );
    }

    #[test]
    fn every_unrecognized_kind_shares_one_palette_slot() {
        let stub = NodeKind::Other("stub".to_string());
        let vlink = NodeKind::Other("vlink".to_string());
        assert_eq!(node_default_fill(&stub), node_default_fill(&vlink));
        assert_eq!(node_default_radius(&stub), node_default_radius(&vlink));
    }

    #[test]
    fn screen_world_transforms_are_inverses() {
        let rect = Rect::from_min_size(pos2(40.0, 20.0), vec2(800.0, 600.0));
        let pan = vec2(13.0, -7.0);
        let zoom = 1.7;
        let world = vec2(120.0, 333.0);

        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 1e-3);
    }
}

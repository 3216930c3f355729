use eframe::egui::{Vec2, vec2};

use super::SceneGraph;

const ALPHA_MIN: f32 = 0.001;
const ALPHA_DECAY: f32 = 0.0228;
const REHEAT_TARGET: f32 = 0.3;
const VELOCITY_DECAY: f32 = 0.6;

const REPULSION_STRENGTH: f32 = 1_800.0;
const LINK_STRENGTH: f32 = 0.22;
const LINK_REST_LENGTH: f32 = 58.0;

/// Force-directed layout over one scene. Forces (link spring, pairwise
/// repulsion, centering) are composed additively every step and scaled by a
/// cooling `alpha`; once alpha falls under the floor with the target at
/// rest, the simulation sleeps and `step` leaves positions untouched.
pub(super) struct Simulation {
    alpha: f32,
    alpha_target: f32,
    center: Vec2,
}

impl Simulation {
    /// Viewport dimensions are read once, at simulation start.
    pub(super) fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            alpha: 1.0,
            alpha_target: 0.0,
            center: vec2(viewport_width, viewport_height) * 0.5,
        }
    }

    /// Raises the target energy so repositioning one node visibly perturbs
    /// its neighbors. Invoked at drag start.
    pub(super) fn reheat(&mut self) {
        self.alpha_target = REHEAT_TARGET;
    }

    /// Lets the simulation settle back to rest. Invoked at drag end.
    pub(super) fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    /// One integration step. Returns false without mutating anything when
    /// the simulation has cooled, so repeated ticks are position-stable.
    pub(super) fn step(&mut self, scene: &mut SceneGraph) -> bool {
        if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
            return false;
        }
        let node_count = scene.nodes.len();
        if node_count == 0 {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

        let mut forces = vec![Vec2::ZERO; node_count];

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let delta = scene.nodes[i].world_pos - scene.nodes[j].world_pos;
                let distance = delta.length().max(1.0);
                let push = delta / (distance * distance * distance)
                    * (REPULSION_STRENGTH * self.alpha);
                forces[i] += push;
                forces[j] -= push;
            }
        }

        for &(from, to) in &scene.edges {
            // a self-loop exerts no force
            if from == to || from >= node_count || to >= node_count {
                continue;
            }

            let delta = scene.nodes[to].world_pos - scene.nodes[from].world_pos;
            let distance = delta.length().max(1.0);
            let direction = delta / distance;
            let rest = LINK_REST_LENGTH
                + scene.nodes[from].base_radius
                + scene.nodes[to].base_radius;
            let correction = direction * ((distance - rest) * LINK_STRENGTH * self.alpha);

            forces[from] += correction;
            forces[to] -= correction;
        }

        for (node, force) in scene.nodes.iter_mut().zip(forces) {
            node.velocity = (node.velocity + force) * VELOCITY_DECAY;
            node.world_pos += node.velocity;
        }

        // centering: translate the centroid onto the viewport center
        let mut centroid = Vec2::ZERO;
        for node in &scene.nodes {
            centroid += node.world_pos;
        }
        centroid /= node_count as f32;
        let shift = self.center - centroid;
        for node in &mut scene.nodes {
            node.world_pos += shift;
        }

        // pinned nodes snap back to the pin, exempt from every force
        for node in &mut scene.nodes {
            if let Some(pin) = node.pinned {
                node.world_pos = pin;
                node.velocity = Vec2::ZERO;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SceneNode;
    use eframe::egui::Color32;

    fn scene(positions: &[(f32, f32)], edges: &[(usize, usize)]) -> SceneGraph {
        SceneGraph {
            nodes: positions
                .iter()
                .map(|&(x, y)| SceneNode {
                    world_pos: vec2(x, y),
                    velocity: Vec2::ZERO,
                    pinned: None,
                    base_radius: 7.0,
                    fill: Color32::WHITE,
                })
                .collect(),
            edges: edges.to_vec(),
        }
    }

    fn run_until_cooled(sim: &mut Simulation, scene: &mut SceneGraph) {
        for _ in 0..10_000 {
            if !sim.step(scene) {
                return;
            }
        }
        panic!("simulation did not cool");
    }

    #[test]
    fn cooled_step_leaves_positions_untouched() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(10.0, 10.0), (500.0, 400.0)], &[(0, 1)]);
        run_until_cooled(&mut sim, &mut graph);

        let frozen = graph
            .nodes
            .iter()
            .map(|node| node.world_pos)
            .collect::<Vec<_>>();
        assert!(!sim.step(&mut graph));
        for (node, before) in graph.nodes.iter().zip(frozen) {
            assert_eq!(node.world_pos, before);
        }
    }

    #[test]
    fn reheat_wakes_a_cooled_simulation() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(10.0, 10.0), (500.0, 400.0)], &[(0, 1)]);
        run_until_cooled(&mut sim, &mut graph);

        assert!(!sim.step(&mut graph));
        sim.reheat();
        assert!(sim.step(&mut graph));
    }

    #[test]
    fn linked_nodes_approach_the_rest_length() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(0.0, 300.0), (780.0, 300.0)], &[(0, 1)]);
        let initial = (graph.nodes[0].world_pos - graph.nodes[1].world_pos).length();

        run_until_cooled(&mut sim, &mut graph);
        let settled = (graph.nodes[0].world_pos - graph.nodes[1].world_pos).length();
        assert!(settled < initial);
    }

    #[test]
    fn pinned_node_holds_its_pin_while_free_nodes_move() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(100.0, 100.0), (120.0, 100.0), (110.0, 140.0)], &[(0, 1)]);
        graph.pin(0, vec2(50.0, 50.0));

        sim.reheat();
        for _ in 0..20 {
            sim.step(&mut graph);
            assert_eq!(graph.nodes[0].world_pos, vec2(50.0, 50.0));
            assert_eq!(graph.nodes[0].velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn unpin_frees_the_node_immediately() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(100.0, 100.0), (104.0, 100.0)], &[]);
        graph.pin(0, vec2(50.0, 50.0));
        sim.reheat();
        sim.step(&mut graph);

        graph.unpin(0);
        assert!(graph.nodes[0].pinned.is_none());

        // still at the pin for the moment, but force-exempt no longer:
        // repulsion from the nearby node pushes it away
        sim.cool();
        sim.step(&mut graph);
        let mut moved = graph.nodes[0].world_pos != vec2(50.0, 50.0);
        for _ in 0..50 {
            sim.step(&mut graph);
            moved |= graph.nodes[0].world_pos != vec2(50.0, 50.0);
        }
        assert!(moved);
    }

    #[test]
    fn self_loop_exerts_no_link_force() {
        let mut sim = Simulation::new(800.0, 600.0);
        let mut graph = scene(&[(400.0, 300.0)], &[(0, 0)]);
        assert!(sim.step(&mut graph));
        // a single node with only a self-loop sits at the viewport center
        assert_eq!(graph.nodes[0].world_pos, vec2(400.0, 300.0));
    }
}

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Context, Vec2};

use crate::lsdb::{Snapshot, load_log, load_snapshot};

mod graph;
mod physics;
mod render_utils;
mod selection;
mod ui;

use physics::Simulation;
use selection::{Inspection, SelectionController};

pub struct LsdbScopeApp {
    snapshot_path: PathBuf,
    log_path: Option<PathBuf>,
    refresh: Option<Duration>,
    last_refresh: Instant,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
    /// Most recent failed refresh while the previous snapshot stays on
    /// screen. Cleared by the next successful load.
    refresh_error: Option<String>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

type LoadResult = Result<LoadedData, String>;

struct LoadedData {
    snapshot: Snapshot,
    log: Option<Result<String, String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Topology,
    Adjacency,
    Log,
}

struct ViewModel {
    snapshot: Snapshot,
    log: Option<Result<String, String>>,
    tab: Tab,
    scene: SceneGraph,
    // created on the first topology frame, when the viewport size is known
    sim: Option<Simulation>,
    selection: SelectionController,
    inspection: Option<Inspection>,
    drag_node: Option<usize>,
    pan: Vec2,
    zoom: f32,
    search: String,
}

/// Simulation-facing form of one snapshot's graph. Nodes are index-aligned
/// with the snapshot's node list; edges are copies of the resolved link
/// index pairs, so layout and selection address the same nodes.
struct SceneGraph {
    nodes: Vec<SceneNode>,
    edges: Vec<(usize, usize)>,
}

struct SceneNode {
    world_pos: Vec2,
    velocity: Vec2,
    /// Pinned position while the node is dragged. One field for both
    /// coordinates: a node is either free or fully pinned.
    pinned: Option<Vec2>,
    base_radius: f32,
    fill: Color32,
}

impl SceneGraph {
    fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = Some(position);
        }
    }

    fn unpin(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = None;
        }
    }
}

impl LsdbScopeApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        snapshot_path: PathBuf,
        log_path: Option<PathBuf>,
        refresh_secs: Option<u64>,
    ) -> Self {
        let rx = Self::spawn_load(snapshot_path.clone(), log_path.clone());
        Self {
            snapshot_path,
            log_path,
            refresh: refresh_secs.map(Duration::from_secs),
            last_refresh: Instant::now(),
            state: AppState::Loading { rx },
            reload_rx: None,
            refresh_error: None,
        }
    }

    fn spawn_load(snapshot_path: PathBuf, log_path: Option<PathBuf>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_snapshot(&snapshot_path)
                .map(|snapshot| LoadedData {
                    snapshot,
                    log: log_path
                        .as_deref()
                        .map(|path| load_log(path).map_err(|error| format!("{error:#}"))),
                })
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for LsdbScopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading LSDB snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load LSDB snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading {
                            rx: Self::spawn_load(
                                self.snapshot_path.clone(),
                                self.log_path.clone(),
                            ),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &mut reload_requested,
                    is_reloading,
                    self.refresh_error.as_deref(),
                );

                if let Some(interval) = self.refresh
                    && self.reload_rx.is_none()
                {
                    let elapsed = self.last_refresh.elapsed();
                    if elapsed >= interval {
                        reload_requested = true;
                    } else {
                        ctx.request_repaint_after(interval - elapsed);
                    }
                }

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(
                        self.snapshot_path.clone(),
                        self.log_path.clone(),
                    ));
                    self.last_refresh = Instant::now();
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        // the old view model is dropped wholesale: its
                        // scene and simulation stop producing ticks before
                        // the new graph starts
                        Ok(Ok(data)) => {
                            self.refresh_error = None;
                            transition = Some(AppState::Ready(Box::new(ViewModel::new(data))));
                        }
                        Ok(Err(error)) => {
                            tracing::warn!(
                                error = %error,
                                "snapshot refresh failed; keeping previous snapshot"
                            );
                            self.refresh_error = Some(error);
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint_after(Duration::from_millis(100));
                        }
                        Err(TryRecvError::Disconnected) => {
                            self.refresh_error =
                                Some("background loader disconnected".to_owned());
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

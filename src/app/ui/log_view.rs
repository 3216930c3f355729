use eframe::egui::{self, Color32, RichText, Ui};

use super::super::ViewModel;

const NEW_COLOR: Color32 = Color32::from_rgb(0x3c, 0xb3, 0x7a);
const REMOVED_COLOR: Color32 = Color32::from_rgb(0xe9, 0x54, 0x64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum LogTag {
    New,
    Removed,
}

/// Splits one log line around its highlighted substrings. Only the first
/// occurrence of each marker is tagged, matching the non-global replacement
/// of the original page.
pub(in crate::app) fn highlight_segments(line: &str) -> Vec<(&str, Option<LogTag>)> {
    let mut marks = Vec::new();
    if let Some(start) = line.find("New") {
        marks.push((start, "New".len(), LogTag::New));
    }
    if let Some(start) = line.find("Removed") {
        marks.push((start, "Removed".len(), LogTag::Removed));
    }
    marks.sort_by_key(|&(start, _, _)| start);

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, len, tag) in marks {
        if start > cursor {
            segments.push((&line[cursor..start], None));
        }
        segments.push((&line[start..start + len], Some(tag)));
        cursor = start + len;
    }
    if cursor < line.len() {
        segments.push((&line[cursor..], None));
    }
    segments
}

impl ViewModel {
    pub(in crate::app) fn draw_log(&self, ui: &mut Ui) {
        ui.heading("LSDB change log");
        ui.add_space(6.0);

        let text = match &self.log {
            None => {
                ui.label("No log file configured (pass --log).");
                return;
            }
            Some(Err(error)) => {
                ui.label(format!("Log unavailable: {error}"));
                return;
            }
            Some(Ok(text)) => text,
        };

        let lines = text
            .lines()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        ui.label(RichText::new(format!("{} lines", lines.len())).strong());
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in lines {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        for (segment, tag) in highlight_segments(line) {
                            let rich = RichText::new(segment).monospace();
                            let rich = match tag {
                                Some(LogTag::New) => rich.color(NEW_COLOR).strong(),
                                Some(LogTag::Removed) => rich.color(REMOVED_COLOR).strong(),
                                None => rich,
                            };
                            ui.label(rich);
                        }
                    });
                }
            });
    }
}

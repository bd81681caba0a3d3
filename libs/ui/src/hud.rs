use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use terrain::render::WireframeStats;
use terrain::{CameraState, HeightGrid};

#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct UiInputCapture {
    /// True when egui wants to consume keyboard input (typically when editing text).
    pub keyboard: bool,
}

const KEY_LEGEND: [(&str, &str); 6] = [
    ("I", "Zoom in"),
    ("O", "Zoom out"),
    ("A", "Yaw left"),
    ("D", "Yaw right"),
    ("W", "Pitch up"),
    ("S", "Pitch down"),
];

pub fn update_ui_input_capture(mut contexts: EguiContexts, mut capture: ResMut<UiInputCapture>) {
    let ctx = match contexts.ctx_mut() {
        Ok(ctx) => ctx,
        Err(_) => {
            capture.keyboard = false;
            return;
        }
    };

    capture.keyboard = ctx.wants_keyboard_input();
}

pub fn camera_hud_system(
    mut contexts: EguiContexts,
    camera: Res<CameraState>,
    grid: Res<HeightGrid>,
    stats: Res<WireframeStats>,
) {
    let ctx = match contexts.ctx_mut() {
        Ok(ctx) => ctx,
        Err(_) => return,
    };

    let margin = 10.0;
    let info_width = 220.0;
    let info_height = 230.0;

    let viewport = ctx.viewport_rect();
    let (lo, hi) = grid.min_max();

    egui::Area::new("camera_info".into())
        .fixed_pos(egui::pos2(
            margin,
            viewport.height() - info_height - margin,
        ))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(35, 35, 35, 220))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 90, 90)))
                .corner_radius(6)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(info_width, info_height));

                    ui.label(format!(
                        "Grid {0}x{0}, amplitude {1}",
                        grid.dimension(),
                        grid.amplitude()
                    ));
                    ui.label(format!("Heights {lo}..={hi}"));
                    ui.separator();

                    ui.label(format!("Zoom: {:.3}", camera.zoom));
                    ui.label(format!("Yaw: {:.2} rad", camera.angle_y));
                    ui.label(format!("Pitch: {:.2} rad", camera.angle_x));
                    ui.label(format!(
                        "Edges: {} drawn, {} skipped",
                        stats.segments, stats.skipped
                    ));
                    ui.separator();

                    for (key, action) in KEY_LEGEND {
                        ui.label(format!("{key}: {action}"));
                    }
                });
        });
}

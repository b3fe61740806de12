//! Presentation layer
//!
//! Turns a read-only view of the round into draw calls. Nothing here
//! mutates simulation state.

pub mod hud;
pub mod ship_model;
pub mod surface;

pub use hud::{AnswerLabel, Banner, HudView, IntroOverlay, wrap_label};
pub use ship_model::{ShipModel, ShipPose};
pub use surface::{Camera, Color, DrawCommand, DrawList, RenderSurface, colors};

use glam::Vec3;

use crate::settings::Settings;
use crate::sim::round::QuizRound;

/// Chase distance behind the ship
const CAMERA_BACK: f32 = 10.0;
/// Look-ahead distance in front of the ship
const CAMERA_AHEAD: f32 = 30.0;
/// Projectile beam length
const BEAM_LENGTH: f32 = 2.0;

/// Chase camera, pulled toward the axis, with strike shake
pub fn camera_for(round: &QuizRound, settings: &Settings) -> Camera {
    let ship = round.ship().world_position();
    let shake = if settings.effective_screen_shake() {
        round.screen_shake()
    } else {
        0.0
    };
    // Deterministic jitter in [-shake, shake]
    let t = round.elapsed();
    let jitter = Vec3::new((t * 97.0).sin(), (t * 89.0 + 1.3).sin(), 0.0) * shake;

    Camera {
        eye: Vec3::new(ship.x * 0.2, ship.y * 0.2, ship.z + CAMERA_BACK) + jitter,
        target: Vec3::new(ship.x * 0.3, ship.y * 0.3, ship.z - CAMERA_AHEAD),
        up: Vec3::Y,
    }
}

/// Emit a complete frame for the round
pub fn draw_round(round: &QuizRound, settings: &Settings, surface: &mut dyn RenderSurface) {
    surface.submit(DrawCommand::BeginFrame {
        camera: camera_for(round, settings),
        clear: colors::BACKGROUND,
    });

    draw_tunnel(round, settings, surface);

    // Markers (live rock or its burst)
    for marker in round.markers() {
        if marker.is_alive() {
            let color = if marker.hit_flash > 0.0 {
                colors::MARKER_FLASH
            } else {
                colors::MARKER_ROCK
            };
            surface.submit(DrawCommand::Marker {
                pos: marker.world_position(),
                radius: marker.radius(),
                rotation: marker.rotation,
                color,
            });
        } else if settings.particles && marker.burst_visible() {
            for p in &marker.particles {
                let [r, g, b] = p.color;
                surface.submit(DrawCommand::Particle {
                    pos: p.pos,
                    size: p.size,
                    color: [r, g, b, p.alpha()],
                });
            }
        }
    }

    let ship = round.ship();
    surface.submit(DrawCommand::Ship {
        model: settings.ship_model,
        pose: settings.ship_model.pose(ship),
    });

    for shot in round.projectiles().iter() {
        surface.submit(DrawCommand::Projectile {
            pos: shot.pos,
            tail: shot.pos + Vec3::Z * BEAM_LENGTH,
            color: colors::PROJECTILE,
        });
    }

    surface.submit(DrawCommand::Hud(HudView::from_round(round, settings)));
    surface.submit(DrawCommand::EndFrame);
}

/// The tunnel travels with the ship, so its items are offset by the ship's axial position
fn draw_tunnel(round: &QuizRound, settings: &Settings, surface: &mut dyn RenderSurface) {
    let tunnel = round.tunnel();
    let offset = Vec3::Z * round.ship().axial();

    for star in tunnel.visible_stars() {
        surface.submit(DrawCommand::Star {
            pos: star.pos + offset,
            size: star.size,
            brightness: star.brightness,
        });
    }

    if settings.quality.speed_lines_enabled() {
        for streak in tunnel.visible_streaks() {
            surface.submit(DrawCommand::Streak {
                head: streak.head + offset,
                tail: streak.tail + offset,
                brightness: streak.brightness,
            });
        }
    }

    for z in tunnel.ring_offsets() {
        // Fade with distance
        let alpha = (1.0 + z / 480.0).clamp(0.0, 1.0) * 0.4;
        surface.submit(DrawCommand::Ring {
            z: z + offset.z,
            radius: tunnel.radius,
            alpha,
        });
    }

    for (_, pos) in tunnel.lane_guides() {
        surface.submit(DrawCommand::LaneGuide {
            pos: pos + offset,
            color: colors::LANE_GUIDE,
        });
    }
}

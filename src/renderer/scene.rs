//! Scene building
//!
//! `build_scene` is a pure read of the game state. The only outside input is
//! `now_ms`, which drives the thread wobble. Same state and same time give the
//! same list.

use glam::Vec2;

use super::draw::{DrawCmd, TextAlign};
use super::shapes::{THREAD_SEGMENTS, knot, pixel_heart, shaky_string};
use crate::consts::*;
use crate::platform::SpriteId;
use crate::settings::Settings;
use crate::sim::ending::{STAND_H, STAND_W};
use crate::sim::{EndingState, GamePhase, GameState, Rect};

pub const BACKGROUND: &str = "#0f0e15";
pub const THREAD_COLOR: &str = "#8b0000";
pub const TEXT_COLOR: &str = "#efe3d0";
pub const PIP_FULL: &str = "#ff4d6d";
pub const PIP_EMPTY: &str = "#5b4f5c";
pub const FADE_OVERLAY: &str = "rgba(0,0,0,0.05)";

pub const HINT_TEXT: &str = "← → ↑ ↓ MOVE   SPACE SHOOT";
pub const HINT_FONT: &str = "12px \"Press Start 2P\"";
pub const CAPTION_TEXT: &str = "You sparked magic, love begins soon...";
pub const CAPTION_FONT: &str = "18px system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif";

const THREAD_WIDTH: f32 = 4.0;
const PIP_ORIGIN: Vec2 = Vec2::new(10.0, 8.0);
const PIP_PITCH: f32 = 26.0;
const PIP_CELL: f32 = 2.0;
const HINT_POS: Vec2 = Vec2::new(10.0, 208.0);

/// Presentation switches derived from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub show_controls_hint: bool,
    /// Multiplier on the thread wobble (0 = still)
    pub thread_amplitude: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_controls_hint: true,
            thread_amplitude: 1.0,
        }
    }
}

impl From<&Settings> for SceneOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            show_controls_hint: settings.show_controls_hint,
            thread_amplitude: if settings.reduced_motion { 0.0 } else { 1.0 },
        }
    }
}

/// Build the display list for the current phase
pub fn build_scene(state: &GameState, opts: &SceneOptions, now_ms: f64) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Fill {
        rect: Rect::new(0.0, 0.0, state.width, state.height),
        color: BACKGROUND,
    }];

    match &state.phase {
        GamePhase::Start => {}
        GamePhase::Play => play_scene(state, opts, &mut cmds),
        GamePhase::Ending(ending) => ending_scene(state, ending, opts, now_ms, &mut cmds),
    }

    cmds
}

fn play_scene(state: &GameState, opts: &SceneOptions, cmds: &mut Vec<DrawCmd>) {
    let player = &state.player;
    cmds.push(DrawCmd::sprite(
        SpriteId::Player,
        player.pos.x,
        player.pos.y,
        player.size.x,
        player.size.y,
    ));
    // Bow sits beside the face, never over it
    cmds.push(DrawCmd::sprite(
        SpriteId::Bow,
        player.pos.x + BOW_OFFSET.0,
        player.pos.y + BOW_OFFSET.1,
        BOW_SIZE,
        BOW_SIZE,
    ));

    for p in &state.projectiles {
        cmds.push(DrawCmd::sprite(
            SpriteId::Arrow,
            p.pos.x,
            p.pos.y,
            p.size.x,
            p.size.y,
        ));
    }

    let target = &state.target;
    cmds.push(DrawCmd::sprite(
        SpriteId::Target,
        target.pos.x,
        target.pos.y,
        target.size.x,
        target.size.y,
    ));

    for pop in &state.pops {
        let center = pop.pos + Vec2::splat(POP_SIZE / 2.0);
        cmds.push(DrawCmd::scaled_sprite(
            SpriteId::Heart,
            center,
            POP_SIZE,
            pop.scale(),
            pop.alpha(),
        ));
    }

    hit_pips(state.hits, state.max_hits, cmds);

    if opts.show_controls_hint {
        cmds.push(DrawCmd::Text {
            text: HINT_TEXT,
            pos: HINT_POS,
            font: HINT_FONT,
            color: TEXT_COLOR,
            align: TextAlign::Left,
        });
    }
}

fn hit_pips(hits: u32, total: u32, cmds: &mut Vec<DrawCmd>) {
    for i in 0..total {
        let color = if i < hits { PIP_FULL } else { PIP_EMPTY };
        let origin = PIP_ORIGIN + Vec2::new(i as f32 * PIP_PITCH, 0.0);
        cmds.extend(
            pixel_heart(origin, PIP_CELL)
                .into_iter()
                .map(|rect| DrawCmd::Fill { rect, color }),
        );
    }
}

fn ending_scene(
    state: &GameState,
    ending: &EndingState,
    opts: &SceneOptions,
    now_ms: f64,
    cmds: &mut Vec<DrawCmd>,
) {
    cmds.push(DrawCmd::sprite(
        SpriteId::TargetStanding,
        ending.target_x,
        ending.mid_y,
        STAND_W,
        STAND_H,
    ));
    cmds.push(DrawCmd::sprite(
        SpriteId::PlayerStanding,
        ending.player_x,
        ending.mid_y,
        STAND_W,
        STAND_H,
    ));

    let (left, right) = ending.hand_anchors();
    thread(left, right, opts.thread_amplitude, now_ms, cmds);

    if ending.heart_timer().is_some() {
        cmds.push(DrawCmd::scaled_sprite(
            SpriteId::Heart,
            ending.heart_center(),
            POP_SIZE,
            ending.heart_scale(),
            ending.heart_alpha(),
        ));
    }

    cmds.push(DrawCmd::Text {
        text: CAPTION_TEXT,
        pos: Vec2::new(state.width / 2.0, ending.mid_y + 140.0),
        font: CAPTION_FONT,
        color: TEXT_COLOR,
        align: TextAlign::Center,
    });

    if ending.fading() {
        cmds.push(DrawCmd::Fill {
            rect: Rect::new(0.0, 0.0, state.width, state.height),
            color: FADE_OVERLAY,
        });
    }
}

/// Shaky string plus a knot at each end
fn thread(a: Vec2, b: Vec2, amp: f32, now_ms: f64, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::Polyline {
        points: shaky_string(a, b, amp, THREAD_SEGMENTS, now_ms),
        width: THREAD_WIDTH,
        color: THREAD_COLOR,
    });
    cmds.push(DrawCmd::Fill {
        rect: knot(a),
        color: THREAD_COLOR,
    });
    cmds.push(DrawCmd::Fill {
        rect: knot(b),
        color: THREAD_COLOR,
    });
}

/// Start-screen decoration: the oversized thread image plus a live string
/// across the middle of the title card
pub fn decoration_scene(width: f32, height: f32, opts: &SceneOptions, now_ms: f64) -> Vec<DrawCmd> {
    let mut cmds = vec![
        DrawCmd::Clear,
        DrawCmd::sprite(
            SpriteId::Thread,
            -width * 0.05,
            -height * 0.25,
            width * 2.0,
            height * 2.0,
        ),
    ];
    let y = height * 0.5;
    thread(
        Vec2::new(width * 0.15, y),
        Vec2::new(width * 0.85, y),
        1.5 * opts.thread_amplitude,
        now_ms,
        &mut cmds,
    );
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ending::EndingPhase;
    use crate::sim::{Projectile, TickInput, tick};

    fn sprite_ids(cmds: &[DrawCmd]) -> Vec<SpriteId> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Sprite { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn busy_play_state() -> GameState {
        let mut state = GameState::new(320.0, 240.0, 77);
        state.start();
        state.shoot();
        state.pop_heart();
        state.hits = 1;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0 / 30.0);
        state
    }

    #[test]
    fn test_start_is_background_only() {
        let state = GameState::new(320.0, 240.0, 1);
        let cmds = build_scene(&state, &SceneOptions::default(), 0.0);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCmd::Fill { color: BACKGROUND, .. }));
    }

    #[test]
    fn test_play_draw_order() {
        let state = busy_play_state();
        let cmds = build_scene(&state, &SceneOptions::default(), 0.0);
        assert!(matches!(cmds[0], DrawCmd::Fill { color: BACKGROUND, .. }));
        assert_eq!(
            sprite_ids(&cmds),
            vec![
                SpriteId::Player,
                SpriteId::Bow,
                SpriteId::Arrow,
                SpriteId::Target,
                SpriteId::Heart,
            ]
        );
        assert!(matches!(cmds.last(), Some(DrawCmd::Text { text: HINT_TEXT, .. })));
    }

    #[test]
    fn test_bow_does_not_cover_face() {
        let state = busy_play_state();
        let cmds = build_scene(&state, &SceneOptions::default(), 0.0);
        let bow = cmds.iter().find_map(|c| match c {
            DrawCmd::Sprite { id: SpriteId::Bow, rect, .. } => Some(*rect),
            _ => None,
        });
        let bow = bow.expect("bow drawn");
        assert!(bow.x > state.player.pos.x + state.player.size.x * 0.75);
    }

    #[test]
    fn test_hud_pips_split_by_hits() {
        let state = busy_play_state();
        let cmds = build_scene(&state, &SceneOptions::default(), 0.0);
        let full = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { color: PIP_FULL, .. }))
            .count();
        let empty = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { color: PIP_EMPTY, .. }))
            .count();
        assert!(full > 0);
        assert_eq!(empty, full * 2);
    }

    #[test]
    fn test_pop_faded_and_scaled() {
        let mut state = GameState::new(320.0, 240.0, 1);
        state.start();
        state.pop_heart();
        state.pops[0].age = 0.5;
        let cmds = build_scene(&state, &SceneOptions::default(), 0.0);
        let (rect, alpha) = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Sprite {
                    id: SpriteId::Heart,
                    rect,
                    alpha,
                    ..
                } => Some((*rect, *alpha)),
                _ => None,
            })
            .expect("pop drawn");
        assert!((alpha - 0.444).abs() < 0.01);
        assert!((rect.w - 32.0 * 1.4).abs() < 1e-3);
        // Still centred on the pop
        assert!((rect.x + rect.w / 2.0 - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut state = busy_play_state();
        state.projectiles.push(Projectile::new(99, Vec2::new(10.0, 10.0)));
        let opts = SceneOptions::default();
        let before = state.clone();
        let a = build_scene(&state, &opts, 1234.5);
        let b = build_scene(&state, &opts, 1234.5);
        assert_eq!(a, b);
        assert_eq!(state.time_ticks, before.time_ticks);
        assert_eq!(state.projectiles, before.projectiles);

        state.win();
        let a = build_scene(&state, &opts, 1234.5);
        let b = build_scene(&state, &opts, 1234.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ending_layers() {
        let mut state = GameState::new(320.0, 240.0, 1);
        state.start();
        state.win();
        let opts = SceneOptions::default();

        let cmds = build_scene(&state, &opts, 0.0);
        assert_eq!(
            sprite_ids(&cmds),
            vec![SpriteId::TargetStanding, SpriteId::PlayerStanding]
        );
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::Polyline { .. })));
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::Text { text: CAPTION_TEXT, .. })));
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::Fill { color: FADE_OVERLAY, .. })));

        if let GamePhase::Ending(ending) = &mut state.phase {
            ending.phase = EndingPhase::Heart { timer: 2.5 };
        }
        let cmds = build_scene(&state, &opts, 0.0);
        assert_eq!(
            sprite_ids(&cmds),
            vec![SpriteId::TargetStanding, SpriteId::PlayerStanding, SpriteId::Heart]
        );
        assert!(matches!(cmds.last(), Some(DrawCmd::Fill { color: FADE_OVERLAY, .. })));
    }

    #[test]
    fn test_options_hide_hint_and_still_thread() {
        let mut state = GameState::new(320.0, 240.0, 1);
        state.start();
        let opts = SceneOptions {
            show_controls_hint: false,
            thread_amplitude: 0.0,
        };
        let cmds = build_scene(&state, &opts, 0.0);
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::Text { .. })));

        state.win();
        let a = build_scene(&state, &opts, 0.0);
        let b = build_scene(&state, &opts, 9999.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_decoration_clears_first() {
        let cmds = decoration_scene(400.0, 200.0, &SceneOptions::default(), 0.0);
        assert_eq!(cmds[0], DrawCmd::Clear);
        assert_eq!(sprite_ids(&cmds), vec![SpriteId::Thread]);
    }
}

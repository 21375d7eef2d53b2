//! Game state and core simulation types
//!
//! One `GameState` exists per page. It is owned by the shell and passed by
//! reference into `tick` and the scene builder; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::ending::EndingState;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    /// Title layer up, waiting for the start button
    Start,
    /// Active gameplay
    Play,
    /// Scripted ending; gameplay entities are frozen
    Ending(EndingState),
}

impl GamePhase {
    pub fn is_play(&self) -> bool {
        matches!(self, GamePhase::Play)
    }

    pub fn ending(&self) -> Option<&EndingState> {
        match self {
            GamePhase::Ending(ending) => Some(ending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Play => "play",
            GamePhase::Ending(_) => "ending",
        }
    }
}

/// Things the shell may want to react to, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Start button accepted
    Started,
    /// A projectile landed; carries the new hit count
    Hit { hits: u32 },
    /// Hit threshold reached, ending began
    Won,
    /// Ending slid together and the heart appeared
    HeartShown,
    /// Ending done: show the video and stop the frame driver
    Handoff,
}

/// The player-controlled archer
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            size: Vec2::splat(PLAYER_SIZE),
        }
    }
}

impl Player {
    /// Where a freshly fired projectile appears
    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(BOW_OFFSET.0, BOW_OFFSET.1) + Vec2::splat(MUZZLE_INSET)
    }
}

/// The evasive target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub size: Vec2,
    /// Point the target is currently easing toward
    pub desired: Vec2,
    /// Seconds until a new desired point is picked
    pub retarget_timer: f32,
}

impl Default for Target {
    fn default() -> Self {
        let spawn = Vec2::new(TARGET_SPAWN.0, TARGET_SPAWN.1);
        Self {
            pos: spawn,
            size: Vec2::splat(TARGET_SIZE),
            desired: spawn,
            retarget_timer: 0.0,
        }
    }
}

impl Target {
    /// Inset box used for collision; the rest of the sprite is not hittable
    pub fn face_region(&self) -> Rect {
        Rect::new(
            self.pos.x + self.size.x * 0.25,
            self.pos.y + self.size.y * 0.15,
            self.size.x * 0.5,
            self.size.y * 0.4,
        )
    }
}

/// A projectile in flight (or lingering briefly after a hit)
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Set once on first contact with the face, never cleared
    pub hit: bool,
    /// Remaining linger time after a hit
    pub hit_timer: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(PROJECTILE_W, PROJECTILE_H),
            vel: Vec2::new(PROJECTILE_SPEED, 0.0),
            hit: false,
            hit_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Still worth keeping: on screen-ish and not done lingering
    pub fn is_live(&self, playfield_width: f32) -> bool {
        self.pos.x < playfield_width + PROJECTILE_OFFSCREEN_MARGIN
            && (!self.hit || self.hit_timer > 0.0)
    }
}

/// Heart pop feedback effect (visual only)
#[derive(Debug, Clone, PartialEq)]
pub struct Pop {
    pub pos: Vec2,
    /// Seconds since spawn
    pub age: f32,
}

impl Pop {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, age: 0.0 }
    }

    pub fn scale(&self) -> f32 {
        1.0 + self.age * 0.8
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.age / POP_LIFETIME
    }

    pub fn is_alive(&self) -> bool {
        self.age < POP_LIFETIME
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub seed: u64,
    /// Evasion RNG
    pub rng: Pcg32,
    /// Playfield size (canvas pixels)
    pub width: f32,
    pub height: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Credited hits
    pub hits: u32,
    /// Hits needed to win
    pub max_hits: u32,
    pub player: Player,
    pub target: Target,
    /// In-flight projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Active pops (spawn order, no cap)
    pub pops: Vec<Pop>,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state for a playfield of the given size
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            phase: GamePhase::Start,
            hits: 0,
            max_hits: DEFAULT_MAX_HITS,
            player: Player::default(),
            target: Target::default(),
            projectiles: Vec::new(),
            pops: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start -> Play. Returns false (and does nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.phase = GamePhase::Play;
        self.push_event(GameEvent::Started);
        true
    }

    /// Play -> Ending. Only the first call while playing has any effect.
    pub(crate) fn win(&mut self) {
        if !self.phase.is_play() {
            return;
        }
        self.phase = GamePhase::Ending(EndingState::new(self.width, self.height));
        self.push_event(GameEvent::Won);
    }

    /// Spawn a projectile at the player's bow
    pub fn shoot(&mut self) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, self.player.muzzle()));
    }

    /// Spawn a pop in the middle of the playfield
    pub fn pop_heart(&mut self) {
        let half = POP_SIZE / 2.0;
        self.pops.push(Pop::new(Vec2::new(
            self.width / 2.0 - half,
            self.height / 2.0 - half,
        )));
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once the ending has asked for the video handoff
    pub fn is_finished(&self) -> bool {
        self.phase.ending().is_some_and(|e| e.finished)
    }
}

//! Dash Runner - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player feel, obstacles, collisions, effects)
//! - `session`: Frame driver that clamps real time and talks to persistence
//! - `snapshot`: Read-only view of a run for renderers and HUDs
//! - `persistence`: Best-score storage backends
//! - `platform`: Browser bindings
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use persistence::{BestScoreStore, MemoryStore, PersistenceError};
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest step fed to the simulation; longer frames are clamped to this
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Reference step used by tests and the headless demo (60 Hz)
    pub const FRAME_DT_60HZ: f32 = 1.0 / 60.0;

    /// View dimensions (world units == pixels)
    pub const VIEW_WIDTH: f32 = 960.0;
    pub const VIEW_HEIGHT: f32 = 300.0;
    /// Y of the ground line (y grows downward)
    pub const GROUND_Y: f32 = VIEW_HEIGHT - 54.0;

    /// Player hitbox
    pub const PLAYER_X: f32 = 110.0;
    pub const PLAYER_WIDTH: f32 = 26.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_DUCK_HEIGHT: f32 = 34.0;

    /// Flyer obstacle size
    pub const FLYER_WIDTH: f32 = 46.0;
    pub const FLYER_HEIGHT: f32 = 32.0;

    /// Ground obstacle catalog (width, height)
    pub const GROUND_CATALOG: [(f32, f32); 5] = [
        (22.0, 42.0),
        (26.0, 48.0),
        (32.0, 54.0),
        (50.0, 48.0),
        (66.0, 54.0),
    ];

    /// Flyer altitude bands (top edge y)
    pub const FLYER_BANDS: [f32; 3] = [GROUND_Y - 80.0, GROUND_Y - 110.0, GROUND_Y - 54.0];
}

/// Format a score as the HUD shows it: floored, non-negative, zero-padded to 5 digits
pub fn format_score(score: f64) -> String {
    let whole = if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    };
    format!("{:05}", whole)
}

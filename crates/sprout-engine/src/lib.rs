pub mod api;
pub mod config;
pub mod core;
pub mod gameplay;
pub mod input;
pub mod scenes;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{SoundEvent, GameEvent, GameMode, GameResult, HudFrame};
pub use config::{ConfigError, GameSettings};
pub use core::time::FixedTimestep;
pub use core::timer::TickTimer;
pub use gameplay::{
    GrowthEngine, GrowthPhase, GrowthState, MAX_HEIGHT,
    VoiceContinuityDetector,
    PlantState, PlantStateMachine, PlantTransition, VoicePrompt,
    PlaySession,
};
pub use input::queue::{custom, InputEvent, InputQueue, ButtonArea};
pub use input::source::{AudioFrame, FeatureSource, FrameSlot, Amplified, ReplaySource};
pub use scenes::{Scene, SceneCommand, SceneFrame, SceneManager, SceneName, SceneNameError};
pub use systems::effects::{EffectsState, Particle, WallCrack, Rng};

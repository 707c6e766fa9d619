//! Per-session gameplay: growth, dropout detection and the plant state
//! machine that combines them.

pub mod growth;
pub mod voice;
pub mod plant;
pub mod session;

pub use growth::{GrowthEngine, GrowthPhase, GrowthState, MAX_HEIGHT};
pub use voice::VoiceContinuityDetector;
pub use plant::{PlantState, PlantStateMachine, PlantTransition, VoicePrompt};
pub use session::PlaySession;

//! Session flow: mode select, idle, message, countdown, play, result.

pub mod manager;
pub mod mode_select;
pub mod idle;
pub mod message;
pub mod countdown;
pub mod playing;
pub mod result;

pub use manager::{Scene, SceneCommand, SceneFrame, SceneManager, SceneName, SceneNameError};

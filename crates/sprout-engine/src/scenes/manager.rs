use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, GameMode, GameResult, HudFrame};
use crate::config::GameSettings;
use crate::input::queue::InputEvent;
use crate::input::source::{AudioFrame, FeatureSource};

use super::countdown::CountdownScene;
use super::idle::{ChallengeIdleScene, TestIdleScene};
use super::message::MessageScene;
use super::mode_select::ModeSelectScene;
use super::playing::PlayingScene;
use super::result::ResultScene;

/// Every scene the session can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneName {
    ModeSelect,
    TestIdle,
    ChallengeIdle,
    Message,
    Countdown,
    TestPlaying,
    ChallengePlaying,
    Result,
}

impl SceneName {
    pub const ALL: [SceneName; 8] = [
        SceneName::ModeSelect,
        SceneName::TestIdle,
        SceneName::ChallengeIdle,
        SceneName::Message,
        SceneName::Countdown,
        SceneName::TestPlaying,
        SceneName::ChallengePlaying,
        SceneName::Result,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SceneName::ModeSelect => "modeSelect",
            SceneName::TestIdle => "testIdle",
            SceneName::ChallengeIdle => "challengeIdle",
            SceneName::Message => "message",
            SceneName::Countdown => "countdown",
            SceneName::TestPlaying => "playing",
            SceneName::ChallengePlaying => "challengePlaying",
            SceneName::Result => "result",
        }
    }

    /// Stable numeric id used on the host bridge.
    pub fn index(self) -> u8 {
        match self {
            SceneName::ModeSelect => 0,
            SceneName::TestIdle => 1,
            SceneName::ChallengeIdle => 2,
            SceneName::Message => 3,
            SceneName::Countdown => 4,
            SceneName::TestPlaying => 5,
            SceneName::ChallengePlaying => 6,
            SceneName::Result => 7,
        }
    }
}

impl fmt::Display for SceneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneNameError {
    #[error("unknown scene name: {0:?}")]
    Unknown(String),
}

impl FromStr for SceneName {
    type Err = SceneNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SceneNameError::Unknown(s.to_owned()))
    }
}

/// What a scene hands to the manager after its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    SwitchTo(SceneName),
    /// Persist the mode, then go to its idle scene.
    ChooseMode(GameMode),
    /// Hand the outcome to the result scene, then switch to it.
    Finish(GameResult),
}

/// Per-tick input handed to the active scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    /// `None` when the host delivered no reading this tick.
    pub audio: Option<AudioFrame>,
    pub events: &'a [InputEvent],
    pub mode: GameMode,
}

/// A single screen of the session flow.
///
/// Scenes never reach back into the manager; they return a
/// [`SceneCommand`] and the manager applies it.
pub trait Scene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {}

    fn on_exit(&mut self, _ctx: &mut EngineContext) {}

    fn update(&mut self, frame: &SceneFrame, ctx: &mut EngineContext) -> SceneCommand;

    fn draw(&self, hud: &mut HudFrame);

    /// Only the result scene stores an outcome.
    fn set_result(&mut self, _result: GameResult) {}

    fn result(&self) -> Option<GameResult> {
        None
    }

    /// Apply changed settings. Scenes that own gameplay state override this.
    fn configure(&mut self, _settings: &GameSettings) {}
}

/// Single-active-scene state machine with a persisted mode.
pub struct SceneManager {
    scenes: HashMap<SceneName, Box<dyn Scene>>,
    active: Option<SceneName>,
    mode: GameMode,
}

impl SceneManager {
    /// Empty manager: no scenes registered, nothing active.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
            mode: GameMode::Test,
        }
    }

    /// Manager with the full scene graph registered. Call
    /// [`switch_to`](Self::switch_to) with [`SceneName::ModeSelect`] to start.
    pub fn with_default_scenes(settings: &GameSettings) -> Self {
        let mut manager = Self::new();
        manager.register(SceneName::ModeSelect, Box::new(ModeSelectScene::new()));
        manager.register(SceneName::TestIdle, Box::new(TestIdleScene::new()));
        manager.register(SceneName::ChallengeIdle, Box::new(ChallengeIdleScene::new(settings)));
        manager.register(SceneName::Message, Box::new(MessageScene::new(settings.tick_rate)));
        manager.register(SceneName::Countdown, Box::new(CountdownScene::new(settings.tick_rate)));
        manager.register(SceneName::TestPlaying, Box::new(PlayingScene::test(settings)));
        manager.register(SceneName::ChallengePlaying, Box::new(PlayingScene::challenge(settings)));
        manager.register(SceneName::Result, Box::new(ResultScene::new()));
        manager
    }

    /// Add or replace a scene.
    pub fn register(&mut self, name: SceneName, scene: Box<dyn Scene>) {
        if self.scenes.insert(name, scene).is_some() {
            log::warn!("scene {} replaced", name);
        }
    }

    pub fn is_registered(&self, name: SceneName) -> bool {
        self.scenes.contains_key(&name)
    }

    /// Exit the current scene, enter `name`, then mark it active.
    /// An unregistered name is logged and ignored; the current scene stays.
    pub fn switch_to(&mut self, name: SceneName, ctx: &mut EngineContext) -> bool {
        if !self.scenes.contains_key(&name) {
            log::error!("scene not found: {}", name);
            return false;
        }

        let previous = self.active;
        if let Some(scene) = previous.and_then(|p| self.scenes.get_mut(&p)) {
            scene.on_exit(ctx);
        }
        if let Some(scene) = self.scenes.get_mut(&name) {
            scene.on_enter(ctx);
        }
        self.active = Some(name);

        log::info!("scene: {} -> {}", previous.map_or("none", SceneName::as_str), name);
        ctx.emit_event(GameEvent::scene_changed(name, previous));
        true
    }

    /// [`switch_to`](Self::switch_to) by host-facing name.
    pub fn switch_to_named(&mut self, name: &str, ctx: &mut EngineContext) -> bool {
        match name.parse::<SceneName>() {
            Ok(name) => self.switch_to(name, ctx),
            Err(err) => {
                log::error!("{}", err);
                false
            }
        }
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::info!("mode: {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_scene_name(&self) -> Option<SceneName> {
        self.active
    }

    /// Store an outcome on the result scene. Must happen before switching to it.
    pub fn set_result(&mut self, result: GameResult) {
        match self.scenes.get_mut(&SceneName::Result) {
            Some(scene) => scene.set_result(result),
            None => log::error!("no result scene registered for {:?}", result),
        }
    }

    /// Outcome currently held by the result scene.
    pub fn result(&self) -> Option<GameResult> {
        self.scenes.get(&SceneName::Result).and_then(|s| s.result())
    }

    /// Poll `source` once and run one tick of the active scene.
    /// Inactive scenes never see the tick.
    pub fn update(&mut self, source: &mut dyn FeatureSource, events: &[InputEvent], ctx: &mut EngineContext) {
        let frame = SceneFrame {
            audio: source.poll(),
            events,
            mode: self.mode,
        };
        let Some(scene) = self.active.and_then(|name| self.scenes.get_mut(&name)) else {
            return;
        };
        let command = scene.update(&frame, ctx);
        self.apply(command, ctx);
    }

    fn apply(&mut self, command: SceneCommand, ctx: &mut EngineContext) {
        match command {
            SceneCommand::None => {}
            SceneCommand::SwitchTo(name) => {
                self.switch_to(name, ctx);
            }
            SceneCommand::ChooseMode(mode) => {
                self.set_mode(mode);
                ctx.emit_event(GameEvent::mode_changed(mode));
                self.switch_to(mode.idle_scene(), ctx);
            }
            SceneCommand::Finish(result) => {
                self.set_result(result);
                self.switch_to(SceneName::Result, ctx);
            }
        }
    }

    /// Fill the HUD from the active scene.
    pub fn draw(&self, hud: &mut HudFrame) {
        let Some(name) = self.active else {
            return;
        };
        hud.begin(name, self.mode);
        if let Some(scene) = self.scenes.get(&name) {
            scene.draw(hud);
        }
    }

    /// Push changed settings to every scene.
    pub fn apply_settings(&mut self, settings: &GameSettings) {
        for scene in self.scenes.values_mut() {
            scene.configure(settings);
        }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::custom;
    use crate::input::source::ReplaySource;

    /// Records enter/exit/update calls so ordering can be checked.
    struct Tracer {
        log: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
        tag: &'static str,
        next: SceneCommand,
    }

    impl Scene for Tracer {
        fn on_enter(&mut self, _ctx: &mut EngineContext) {
            self.log.borrow_mut().push(format!("enter {}", self.tag));
        }
        fn on_exit(&mut self, _ctx: &mut EngineContext) {
            self.log.borrow_mut().push(format!("exit {}", self.tag));
        }
        fn update(&mut self, _frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
            self.log.borrow_mut().push(format!("update {}", self.tag));
            self.next
        }
        fn draw(&self, _hud: &mut HudFrame) {}
    }

    fn traced_manager() -> (SceneManager, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut manager = SceneManager::new();
        for (name, tag) in [(SceneName::ModeSelect, "a"), (SceneName::Message, "b")] {
            manager.register(name, Box::new(Tracer { log: log.clone(), tag, next: SceneCommand::None }));
        }
        (manager, log)
    }

    #[test]
    fn scene_names_round_trip_through_strings() {
        for name in SceneName::ALL {
            assert_eq!(name.as_str().parse::<SceneName>(), Ok(name));
        }
        assert!(matches!("opening".parse::<SceneName>(), Err(SceneNameError::Unknown(_))));
    }

    #[test]
    fn switch_exits_then_enters() {
        let (mut manager, log) = traced_manager();
        let mut ctx = EngineContext::new();
        assert!(manager.switch_to(SceneName::ModeSelect, &mut ctx));
        assert!(manager.switch_to(SceneName::Message, &mut ctx));
        assert_eq!(*log.borrow(), ["enter a", "exit a", "enter b"]);
        assert_eq!(manager.current_scene_name(), Some(SceneName::Message));
        assert_eq!(ctx.events.len(), 2);
    }

    #[test]
    fn unknown_scene_is_a_no_op() {
        let (mut manager, log) = traced_manager();
        let mut ctx = EngineContext::new();
        manager.switch_to(SceneName::ModeSelect, &mut ctx);
        assert!(!manager.is_registered(SceneName::Countdown));
        assert!(!manager.switch_to(SceneName::Countdown, &mut ctx));
        assert!(!manager.switch_to_named("opening", &mut ctx));
        assert_eq!(manager.current_scene_name(), Some(SceneName::ModeSelect));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn only_the_active_scene_is_ticked() {
        let (mut manager, log) = traced_manager();
        let mut ctx = EngineContext::new();
        let mut source = ReplaySource::constant(0.1, 3);
        manager.update(&mut source, &[], &mut ctx);
        assert!(log.borrow().is_empty());

        manager.switch_to(SceneName::Message, &mut ctx);
        for _ in 0..3 {
            manager.update(&mut source, &[], &mut ctx);
        }
        let updates: Vec<_> = log.borrow().iter().filter(|l| l.starts_with("update")).cloned().collect();
        assert_eq!(updates, ["update b", "update b", "update b"]);
    }

    #[test]
    fn explicit_result_survives_entering_result_scene() {
        let mut manager = SceneManager::with_default_scenes(&GameSettings::default());
        assert!(SceneName::ALL.into_iter().all(|name| manager.is_registered(name)));
        let mut ctx = EngineContext::new();
        manager.switch_to(SceneName::ModeSelect, &mut ctx);

        manager.set_result(GameResult::Clear);
        manager.switch_to(SceneName::Result, &mut ctx);
        assert_eq!(manager.result(), Some(GameResult::Clear));

        let mut hud = HudFrame::default();
        manager.draw(&mut hud);
        assert_eq!(hud.result, Some(GameResult::Clear));
        assert_eq!(hud.scene, SceneName::Result);
    }

    #[test]
    fn mode_persists_across_switches() {
        let mut manager = SceneManager::with_default_scenes(&GameSettings::default());
        let mut ctx = EngineContext::new();
        manager.switch_to(SceneName::ModeSelect, &mut ctx);
        let select = [InputEvent::custom(custom::SELECT_MODE, 1.0)];
        manager.update(&mut ReplaySource::default(), &select, &mut ctx);
        assert_eq!(manager.mode(), GameMode::Challenge);
        assert_eq!(manager.current_scene_name(), Some(SceneName::ChallengeIdle));

        manager.switch_to(SceneName::Message, &mut ctx);
        manager.switch_to(SceneName::ModeSelect, &mut ctx);
        assert_eq!(manager.mode(), GameMode::Challenge);
    }

    #[test]
    fn countdown_routes_to_the_mode_play_scene_once() {
        for (mode, play) in [
            (GameMode::Test, SceneName::TestPlaying),
            (GameMode::Challenge, SceneName::ChallengePlaying),
        ] {
            let mut manager = SceneManager::with_default_scenes(&GameSettings::default());
            let mut ctx = EngineContext::new();
            manager.set_mode(mode);
            manager.switch_to(SceneName::Countdown, &mut ctx);
            ctx.clear_frame_data();

            let mut source = ReplaySource::default();
            for _ in 0..359 {
                manager.update(&mut source, &[], &mut ctx);
            }
            assert_eq!(manager.current_scene_name(), Some(SceneName::Countdown));
            manager.update(&mut source, &[], &mut ctx);
            assert_eq!(manager.current_scene_name(), Some(play));

            let switches = ctx.events.iter().filter(|e| e.kind == GameEvent::SCENE_CHANGED).count();
            assert_eq!(switches, 1);
        }
    }
}

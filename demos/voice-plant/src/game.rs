use sprout_engine::*;
use sprout_engine::input::queue::find_custom;

const WORLD_WIDTH: f32 = 800.0;
const WORLD_HEIGHT: f32 = 600.0;

/// The voice plant game: the scene flow plus the host-facing settings.
pub struct VoicePlant {
    scenes: SceneManager,
    slot: FrameSlot,
    settings: GameSettings,
}

impl VoicePlant {
    pub fn new() -> Self {
        Self::with_settings(GameSettings::default())
    }

    pub fn with_settings(settings: GameSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            scenes: SceneManager::with_default_scenes(&settings),
            slot: FrameSlot::new(),
            settings,
        }
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Easy Mode only boosts Test runs; Challenge always hears the raw volume.
    pub fn easy_mode_active(&self) -> bool {
        self.settings.easy_mode && self.scenes.mode() == GameMode::Test
    }

    /// Slider and toggle events from the host UI.
    fn handle_settings_events(&mut self, events: &[InputEvent]) {
        let mut changed = false;
        if let Some(value) = find_custom(events, custom::SET_CLEAR_THRESHOLD) {
            self.settings.set_clear_threshold(value);
            changed = true;
        }
        if let Some(value) = find_custom(events, custom::SET_VOLUME_THRESHOLD) {
            self.settings.set_volume_threshold(value);
            changed = true;
        }
        if let Some(value) = find_custom(events, custom::SET_EASY_MODE) {
            self.settings.easy_mode = value != 0.0;
            if self.settings.easy_mode && self.scenes.mode() == GameMode::Challenge {
                log::info!("easy mode stays off in challenge mode");
            }
            changed = true;
        }
        if changed {
            self.scenes.apply_settings(&self.settings);
        }
    }
}

impl Game for VoicePlant {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ..GameConfig::with_tick_rate(self.settings.tick_rate)
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.scenes.switch_to(SceneName::ModeSelect, ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_settings_events(input.events());

        self.slot.offer(input.audio());
        if self.easy_mode_active() {
            let mut source = Amplified::new(&mut self.slot, self.settings.easy_mode_gain);
            self.scenes.update(&mut source, input.events(), ctx);
        } else {
            self.scenes.update(&mut self.slot, input.events(), ctx);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.scenes.draw(ctx.hud);
    }

    fn apply_settings(&mut self, settings: &GameSettings) {
        if settings.tick_rate != self.settings.tick_rate {
            log::warn!("tick rate changes only apply to a new game");
        }
        self.settings = GameSettings { tick_rate: self.settings.tick_rate, ..*settings };
        self.scenes.apply_settings(&self.settings);
    }
}

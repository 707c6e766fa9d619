use sprout_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, AudioFrame, HudFrame,
    FixedTimestep, GameSettings,
};

/// Generic game runner that wires up the fixed-step loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    hud: HudFrame,
    /// Flat HUD snapshot for host reads.
    hud_buffer: [f32; HudFrame::FLOATS],
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
            hud: HudFrame::default(),
            hud_buffer: [0.0; HudFrame::FLOATS],
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.refresh_hud();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Store this frame's feature reading. Unusable readings are dropped,
    /// which the game sees as a tick without a sample.
    pub fn push_audio(&mut self, volume: f32, frequency_average: f32) {
        match AudioFrame::new(volume, frequency_average) {
            Some(frame) => self.input.push_audio(frame),
            None => log::debug!("dropping unusable audio reading: {}", volume),
        }
    }

    /// Parse settings JSON and hand the clamped result to the game.
    /// A malformed document is logged and leaves the current settings alone.
    pub fn load_settings(&mut self, json: &str) {
        match GameSettings::from_json(json) {
            Ok(settings) => self.game.apply_settings(&settings),
            Err(err) => log::error!("settings rejected: {}", err),
        }
    }

    /// Run one host frame: zero or more fixed updates, then the HUD.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // The sample and UI events belong to the first step only; later
        // catch-up steps run without them.
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            if step == 0 {
                self.input.clear_audio();
                self.input.drain();
            }
        }

        self.ctx.truncate_to(&self.config);
        self.refresh_hud();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    fn refresh_hud(&mut self) {
        let mut render_ctx = RenderContext { hud: &mut self.hud };
        self.game.render(&mut render_ctx);
        self.hud_buffer = self.hud.to_floats();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn hud(&self) -> &HudFrame {
        &self.hud
    }

    // ---- Pointer accessors for host reads ----

    pub fn hud_ptr(&self) -> *const f32 {
        self.hud_buffer.as_ptr()
    }

    pub fn hud_len(&self) -> u32 {
        HudFrame::FLOATS as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_engine::{custom, SoundEvent};

    /// Records what each update saw.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(Option<f32>, usize)>,
        clear_threshold: f32,
    }

    impl Game for Recorder {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.seen.push((input.audio().map(|f| f.volume), input.len()));
            ctx.emit_sound(SoundEvent::COUNTDOWN);
        }

        fn render(&self, ctx: &mut RenderContext) {
            ctx.hud.plant_height = self.seen.len() as f32;
        }

        fn apply_settings(&mut self, settings: &GameSettings) {
            self.clear_threshold = settings.clear_threshold;
        }
    }

    fn runner() -> GameRunner<Recorder> {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner
    }

    #[test]
    fn sample_and_events_reach_only_the_first_step() {
        let mut runner = runner();
        runner.push_audio(0.4, 0.1);
        runner.push_input(InputEvent::custom(custom::START, 0.0));
        runner.tick(3.0 / 60.0 + 0.001);

        let seen = &runner.game().seen;
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (Some(0.4), 1));
        assert_eq!(seen[1], (None, 0));
        assert_eq!(seen[2], (None, 0));
        assert_eq!(runner.sound_events_len(), 3);
        assert_eq!(runner.hud().plant_height, 3.0);
    }

    #[test]
    fn input_waits_for_a_frame_with_a_step() {
        let mut runner = runner();
        runner.push_audio(0.2, 0.0);
        runner.tick(0.001);
        assert!(runner.game().seen.is_empty());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().seen[0].0, Some(0.2));
    }

    #[test]
    fn nan_reading_counts_as_missing() {
        let mut runner = runner();
        runner.push_audio(f32::NAN, 0.0);
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.game().seen[0].0, None);
    }

    #[test]
    fn settings_are_clamped_and_bad_json_ignored() {
        let mut runner = runner();
        runner.load_settings(r#"{"clear_threshold": 0.2}"#);
        assert_eq!(runner.game().clear_threshold, 0.5);
        runner.load_settings("{not json");
        assert_eq!(runner.game().clear_threshold, 0.5);
    }
}

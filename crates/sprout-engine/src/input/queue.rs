use super::source::AudioFrame;

/// Custom event kinds sent by the host UI (buttons, sliders, toggles).
pub mod custom {
    /// Start button on an idle screen.
    pub const START: u32 = 1;
    /// Back button on the result screen (or abort during a test run).
    pub const BACK: u32 = 2;
    /// Mode choice: `a == 0.0` selects Test, anything else Challenge.
    pub const SELECT_MODE: u32 = 3;
    /// Clear line slider, `a` in [0.5, 1.0].
    pub const SET_CLEAR_THRESHOLD: u32 = 4;
    /// Microphone sensitivity slider, `a` is the volume threshold.
    pub const SET_VOLUME_THRESHOLD: u32 = 5;
    /// Easy Mode toggle, `a != 0.0` enables.
    pub const SET_EASY_MODE: u32 = 6;
}

/// Input event types the session core understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A custom event from the UI layer.
    /// `kind` is one of the [`custom`] constants; `a`, `b`, `c` carry data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    pub fn custom(kind: u32, a: f32) -> Self {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }
}

/// Per-frame input: UI events plus the latest feature sample.
/// The host writes into the queue; the runner hands it to the game each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
    audio: Option<AudioFrame>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            audio: None,
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Store this frame's feature sample. A later push in the same frame wins.
    pub fn push_audio(&mut self, frame: AudioFrame) {
        self.audio = Some(frame);
    }

    /// The pending feature sample, if the host delivered one.
    pub fn audio(&self) -> Option<AudioFrame> {
        self.audio
    }

    /// Forget the pending sample so following ticks see "no sample".
    pub fn clear_audio(&mut self) {
        self.audio = None;
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Pending events as a slice.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// First custom event of the given kind, returning its `a` payload.
pub fn find_custom(events: &[InputEvent], wanted: u32) -> Option<f32> {
    events.iter().find_map(|e| match *e {
        InputEvent::Custom { kind, a, .. } if kind == wanted => Some(a),
        _ => None,
    })
}

/// Axis-aligned button rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ButtonArea {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive hit test.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Whether any pointer press in `events` landed inside this button.
    pub fn pressed(&self, events: &[InputEvent]) -> bool {
        events.iter().any(|e| match *e {
            InputEvent::PointerDown { x, y } => self.contains(x, y),
            _ => false,
        })
    }
}

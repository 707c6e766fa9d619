use wasm_bindgen::prelude::*;
use sprout_engine::*;

mod game;
use game::VoicePlant;

sprout_web::export_game!(VoicePlant, "voice-plant");

use wasm_bindgen::prelude::*;
use pogo_engine::*;

mod character;
mod controls;
mod game;
mod level;
mod monitor;
mod phase;
mod tuning;

pub use game::{events, PogoGame};
pub use phase::Phase;
pub use tuning::PogoTuning;

pogo_web::export_game!(PogoGame, "pogo-stickman");

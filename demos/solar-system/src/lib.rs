use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod follow;
mod game;
mod info;
mod orbit;
mod selection;
mod speed;

use bodies::BodyId;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

// ── Panel exports ────────────────────────────────────────────────────

/// Text committed in the multiplier field (blur or Enter).
#[wasm_bindgen]
pub fn game_submit_global_speed(text: &str) {
    with_runner(|r| r.with_game(|g, ctx| g.submit_global_speed(ctx, text)));
}

/// Text committed in a planet's speed field.
#[wasm_bindgen]
pub fn game_submit_body_speed(index: u32, text: &str) {
    with_runner(|r| r.with_game(|g, ctx| g.submit_body_speed(ctx, BodyId(index as usize), text)));
}

/// Info panel content for a body as JSON, or undefined for unknown bodies.
#[wasm_bindgen]
pub fn get_body_info(index: u32) -> Option<String> {
    with_runner(|r| r.game().info_json(BodyId(index as usize)))
}

#[wasm_bindgen]
pub fn get_body_name(index: u32) -> Option<String> {
    with_runner(|r| r.game().body_name(BodyId(index as usize)))
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.game().body_count())
}

/// True while the camera follows a body; the page then owns no wheel scrolling.
#[wasm_bindgen]
pub fn game_is_following() -> bool {
    with_runner(|r| r.game().is_following())
}

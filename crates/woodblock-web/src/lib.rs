pub mod runner;

pub use runner::WorkshopRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use woodblock_engine::{InputEvent, PointerEvent, PointerPhase};

thread_local! {
    static RUNNER: RefCell<Option<WorkshopRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Before `workshop_init` nothing runs.
fn with_runner<R>(f: impl FnOnce(&mut WorkshopRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => Some(f(runner)),
        None => {
            web_sys::console::warn_1(&"workshop not initialized, call workshop_init() first".into());
            None
        }
    })
}

/// Create the workshop. `config_json` may be empty or override any subset of the defaults.
#[wasm_bindgen]
pub fn workshop_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = WorkshopRunner::from_json(config_json);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("woodblock workshop: initialized");
}

#[wasm_bindgen]
pub fn workshop_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Size the host draws the stage surface at, in CSS pixels.
#[wasm_bindgen]
pub fn workshop_set_display_size(width: f32, height: f32) {
    with_runner(|r| r.set_display_size(width, height));
}

/// Pointer sample in display pixels. `phase`: 0 start, 1 move, 2 end, 3 cancel.
#[wasm_bindgen]
pub fn workshop_pointer(id: u32, phase: u32, x: f32, y: f32) {
    let Some(phase) = PointerPhase::from_code(phase) else {
        log::warn!("unknown pointer phase {phase}");
        return;
    };
    with_runner(|r| r.push_input(InputEvent::Pointer(PointerEvent::new(id, phase, x, y))));
}

/// UI action; see `woodblock_engine::kinds` for the codes.
#[wasm_bindgen]
pub fn workshop_action(kind: u32, a: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Custom {
            kind,
            a,
            b: 0.0,
            c: 0.0,
        })
    });
}

// ---- JSON accessors ----

#[wasm_bindgen]
pub fn workshop_state_json() -> String {
    with_runner(|r| r.state_json()).unwrap_or_default()
}

/// The game state as a plain JS object.
#[wasm_bindgen]
pub fn workshop_state() -> JsValue {
    let json = workshop_state_json();
    js_sys::JSON::parse(&json).unwrap_or_else(|err| {
        log::warn!("state is not valid JSON: {err:?}");
        JsValue::NULL
    })
}

#[wasm_bindgen]
pub fn workshop_regions_json() -> String {
    with_runner(|r| r.regions_json()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn workshop_progress_json() -> String {
    with_runner(|r| r.progress_json()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn workshop_rating_json() -> String {
    with_runner(|r| r.rating_json()).unwrap_or_default()
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vertices_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_vertex_count() -> u32 {
    with_runner(|r| r.vertex_count()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_vertex_floats() -> u32 {
    with_runner(|r| r.vertex_floats()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_surface_width() -> f32 {
    with_runner(|r| r.surface_width()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_surface_height() -> f32 {
    with_runner(|r| r.surface_height()).unwrap_or_default()
}

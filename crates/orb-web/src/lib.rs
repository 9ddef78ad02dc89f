pub mod runner;

pub use runner::{entropy_seed, GameRunner};

/// Emit the `#[wasm_bindgen]` surface for one game type.
///
/// The runner lives in a `thread_local!`. Calls made before `game_init` are
/// logged and answered with null pointers or zeros rather than panicking.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orb_engine::*;
///
/// orb_web::export_game!(SwiftOrb, "swift-orb");
/// ```
///
/// `$game_type` must implement `orb_engine::Game` and provide `new()`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            let out = RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f));
            if out.is_none() {
                log::warn!("{}: called before game_init", $game_name);
            }
            out
        }

        fn push_pointer(event: InputEvent) {
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            runner.init();
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, pointer: u32) {
            push_pointer(InputEvent::PointerDown { x, y, pointer });
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32, pointer: u32) {
            push_pointer(InputEvent::PointerMove { x, y, pointer });
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32, pointer: u32) {
            push_pointer(InputEvent::PointerUp { x, y, pointer });
        }

        #[wasm_bindgen]
        pub fn game_pointer_cancel(x: f32, y: f32, pointer: u32) {
            push_pointer(InputEvent::PointerCancel { x, y, pointer });
        }

        /// Throws if the manifest is malformed or lacks a sprite the game needs.
        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> Result<(), JsValue> {
            let result = with_runner(|r| r.load_manifest(json))
                .ok_or_else(|| JsValue::from_str("game_init has not run"))?;
            result.map_err(|e| {
                log::error!("{}: {}", $game_name, e);
                JsValue::from_str(&e.to_string())
            })
        }

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_layer_batches_ptr() -> *const f32 {
            with_runner(|r| r.batches_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_effects_ptr() -> *const f32 {
            with_runner(|r| r.effects_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}

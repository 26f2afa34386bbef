pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper, returning `None` once the runner is gone
/// - All wasm-bindgen exports (lifecycle, keyboard input, data accessors)
///
/// The game type must provide `fn new(width: f32, height: f32) -> Self`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use pogo_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// pogo_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `pogo_engine::Game`
/// - `$game_name`: A string literal used in lifecycle log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Run `f` against the live runner. Calls after `game_destroy()` are no-ops.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[wasm_bindgen]
        pub fn game_init(width: f32, height: f32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new(width, height);
            let mut runner = $crate::GameRunner::new(game);
            runner.init();

            RUNNER.with(|cell| {
                if let Some(mut previous) = cell.borrow_mut().replace(runner) {
                    previous.teardown();
                }
            });
            log::info!("{}: initialized ({}x{})", $game_name, width, height);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key: &str) {
            let key = Key::from_dom(key);
            with_runner(|r| r.push_input(InputEvent::KeyDown { key }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key: &str) {
            let key = Key::from_dom(key);
            with_runner(|r| r.push_input(InputEvent::KeyUp { key }));
        }

        #[wasm_bindgen]
        pub fn game_restart() {
            with_runner(|r| r.restart());
        }

        #[wasm_bindgen]
        pub fn game_destroy() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                runner.teardown();
                log::info!("{}: destroyed", $game_name);
            }
        }

        #[wasm_bindgen]
        pub fn game_load_tuning(json: &str) -> bool {
            with_runner(|r| r.load_tuning(json)).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_phase() -> u32 {
            with_runner(|r| r.status()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_min_x() -> f32 {
            with_runner(|r| r.camera_min_x()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_camera_max_x() -> f32 {
            with_runner(|r| r.camera_max_x()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_camera_min_y() -> f32 {
            with_runner(|r| r.camera_min_y()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_camera_max_y() -> f32 {
            with_runner(|r| r.camera_max_y()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_shapes_ptr() -> *const f32 {
            with_runner(|r| r.shapes_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_shape_count() -> u32 {
            with_runner(|r| r.shape_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_shapes() -> u32 {
            with_runner(|r| r.max_shapes()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}

//! Browser bridge: `#[wasm_bindgen]` exports around a single [`TableRunner`].
//!
//! wasm-bindgen cannot export the generic session, so the runner lives in a
//! `thread_local!` and every export borrows it for the duration of the call.

#[cfg(feature = "physics")]
pub mod runner;

#[cfg(feature = "physics")]
pub use runner::TableRunner;

#[cfg(feature = "physics")]
mod exports {
    use std::cell::RefCell;

    use felt_engine::{InputEvent, TableConfig, TableError};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::runner::TableRunner;

    thread_local! {
        static RUNNER: RefCell<Option<TableRunner>> = RefCell::new(None);
    }

    fn with_runner<R>(f: impl FnOnce(&mut TableRunner) -> R) -> R {
        RUNNER.with(|cell| {
            let mut borrow = cell.borrow_mut();
            let runner = borrow
                .as_mut()
                .expect("Table not initialized. Call table_init() first.");
            f(runner)
        })
    }

    fn to_js(err: TableError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    /// The render target must exist before the loop may start.
    fn find_canvas(canvas_id: &str) -> Result<web_sys::HtmlCanvasElement, TableError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| TableError::RenderTargetUnavailable("no document".into()))?;
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| TableError::RenderTargetUnavailable(format!("no element #{}", canvas_id)))?;
        element
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| TableError::RenderTargetUnavailable(format!("#{} is not a canvas", canvas_id)))
    }

    #[wasm_bindgen]
    pub fn table_init(canvas_id: &str) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let canvas = find_canvas(canvas_id).map_err(to_js)?;
        let seed = js_sys::Date::now() as u64;
        let runner = TableRunner::new(TableConfig::default(), seed).map_err(to_js)?;

        RUNNER.with(|cell| {
            *cell.borrow_mut() = Some(runner);
        });

        log::info!(
            "felt: initialized on #{} ({}x{})",
            canvas_id,
            canvas.width(),
            canvas.height()
        );
        Ok(())
    }

    #[wasm_bindgen]
    pub fn table_tick(dt: f32) -> Result<u32, JsValue> {
        with_runner(|r| r.tick(dt)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn table_key_down(key_code: u32) {
        with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
    }

    #[wasm_bindgen]
    pub fn table_custom_event(kind: u32, a: f32, b: f32, c: f32) {
        with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
    }

    #[wasm_bindgen]
    pub fn table_set_options(json: &str) -> Result<(), JsValue> {
        with_runner(|r| r.set_options(json)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn table_texture_manifest() -> Result<String, JsValue> {
        with_runner(|r| r.texture_manifest()).map_err(to_js)
    }

    // ---- Data accessors ----

    #[wasm_bindgen]
    pub fn get_instances_ptr() -> *const f32 {
        with_runner(|r| r.instances_ptr())
    }

    #[wasm_bindgen]
    pub fn get_instance_count() -> u32 {
        with_runner(|r| r.instance_count())
    }

    #[wasm_bindgen]
    pub fn get_instance_floats() -> u32 {
        with_runner(|r| r.instance_floats())
    }

    #[wasm_bindgen]
    pub fn get_ball_count() -> u32 {
        with_runner(|r| r.ball_count())
    }
}

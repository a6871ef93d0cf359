mod canvas_surface;
mod utils;

use canvas_surface::CanvasSurface;
use system::ClientSession;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Browser side of the shared board.
///
/// The page owns the socket and the pointer listeners and forwards both here.
/// Methods that return a string hand back a message the page must send.
#[wasm_bindgen]
pub struct SketchClient {
    session: ClientSession<Option<CanvasSurface>>,
}

#[wasm_bindgen]
impl SketchClient {
    #[wasm_bindgen(constructor)]
    pub fn new(context: Option<CanvasRenderingContext2d>) -> Self {
        utils::set_panic_hook();
        utils::init_logger();

        SketchClient {
            session: ClientSession::new(context.map(CanvasSurface::new)),
        }
    }

    pub fn attach_context(&mut self, context: CanvasRenderingContext2d) {
        *self.session.surface_mut() = Some(CanvasSurface::new(context));
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.gesture_start(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.gesture_move(x, y);
    }

    pub fn pointer_up(&mut self) -> Option<String> {
        self.session
            .gesture_end()
            .and_then(|command| command.to_json().ok())
    }

    pub fn request_clear(&self) -> Option<String> {
        self.session.request_clear().to_json().ok()
    }

    pub fn handle_message(&mut self, json: &str) {
        self.session.handle_message(json);
    }
}

use crate::message::{SessionCommand, SessionEvent};
use crate::stroke_capture::{render_stroke, StrokeCapture};
use crate::traits::RenderSurface;
use crate::types::{Point, Stroke};

/// One client's view of the shared canvas.
///
/// Local gestures are drawn immediately and handed back as commands to send;
/// events from the coordinator are replayed onto the same surface.
pub struct ClientSession<S: RenderSurface> {
    capture: StrokeCapture,
    surface: S,
}

impl<S: RenderSurface> ClientSession<S> {
    pub fn new(surface: S) -> Self {
        Self {
            capture: StrokeCapture::new(),
            surface,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    pub fn gesture_start(&mut self, x: f64, y: f64) {
        self.capture.begin(Point::new(x, y), &mut self.surface);
    }

    pub fn gesture_move(&mut self, x: f64, y: f64) {
        self.capture.extend(Point::new(x, y), &mut self.surface);
    }

    /// Pointer-up, pointer-leave and touch-end all land here.
    pub fn gesture_end(&mut self) -> Option<SessionCommand> {
        self.capture.finish().map(SessionCommand::Draw)
    }

    /// The surface is erased once the coordinator relays the clear back.
    pub fn request_clear(&self) -> SessionCommand {
        SessionCommand::Clear
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Init(strokes) => {
                log::debug!("Replaying {} strokes", strokes.len());
                for stroke in &strokes {
                    self.replay(stroke);
                }
            }
            SessionEvent::Draw(stroke) => self.replay(&stroke),
            SessionEvent::Clear => self.surface.clear_surface(),
        }
    }

    pub fn handle_message(&mut self, json: &str) {
        match SessionEvent::from_json(json) {
            Ok(event) => self.handle_event(event),
            Err(e) => log::warn!("Ignoring message: {}", e),
        }
    }

    fn replay(&mut self, stroke: &Stroke) {
        render_stroke(stroke, &mut self.surface);
        // put the pen back where the local gesture left it
        if let Some(cursor) = self.capture.cursor() {
            self.surface.move_to(cursor.x, cursor.y);
        }
    }
}

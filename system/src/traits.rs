/// Drawing primitives of the canvas a client renders into.
pub trait RenderSurface {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn clear_surface(&mut self);
}

/// A surface that isn't available yet draws nothing.
impl<S: RenderSurface> RenderSurface for Option<S> {
    fn move_to(&mut self, x: f64, y: f64) {
        if let Some(surface) = self {
            surface.move_to(x, y);
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(surface) = self {
            surface.line_to(x, y);
        }
    }

    fn stroke(&mut self) {
        if let Some(surface) = self {
            surface.stroke();
        }
    }

    fn clear_surface(&mut self) {
        if let Some(surface) = self {
            surface.clear_surface();
        }
    }
}

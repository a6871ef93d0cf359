use system::RenderSurface;
use web_sys::CanvasRenderingContext2d;

const LINE_CAP: &str = "round";
const STROKE_COLOR: &str = "black";
const LINE_WIDTH: f64 = 5.0;

pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        context.set_line_cap(LINE_CAP);
        context.set_stroke_style_str(STROKE_COLOR);
        context.set_line_width(LINE_WIDTH);
        Self { context }
    }
}

impl RenderSurface for CanvasSurface {
    fn move_to(&mut self, x: f64, y: f64) {
        self.context.begin_path();
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }

    fn clear_surface(&mut self) {
        if let Some(canvas) = self.context.canvas() {
            self.context
                .clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
    }
}

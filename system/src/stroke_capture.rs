use crate::traits::RenderSurface;
use crate::types::{Point, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    Capturing { points: Vec<Point> },
}

/// Turns one pointer gesture into a `Stroke`, drawing it locally as it goes.
pub struct StrokeCapture {
    state: CaptureState,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Last point of the gesture in progress.
    pub fn cursor(&self) -> Option<&Point> {
        match &self.state {
            CaptureState::Capturing { points } => points.last(),
            CaptureState::Idle => None,
        }
    }

    pub fn begin(&mut self, point: Point, surface: &mut impl RenderSurface) {
        if self.is_capturing() {
            log::debug!("Gesture restarted before it ended");
        }
        surface.move_to(point.x, point.y);
        self.state = CaptureState::Capturing {
            points: vec![point],
        };
    }

    pub fn extend(&mut self, point: Point, surface: &mut impl RenderSurface) {
        if let CaptureState::Capturing { points } = &mut self.state {
            points.push(point);
            surface.line_to(point.x, point.y);
            surface.stroke();
        }
    }

    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Capturing { points } if !points.is_empty() => Some(Stroke::from(points)),
            _ => None,
        }
    }
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_stroke(stroke: &Stroke, surface: &mut impl RenderSurface) {
    let mut points = stroke.points().iter();
    if let Some(first) = points.next() {
        surface.move_to(first.x, first.y);
        for point in points {
            surface.line_to(point.x, point.y);
        }
        surface.stroke();
    }
}

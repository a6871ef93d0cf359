use std::collections::HashMap;

use sketch_system::{
    ClientSession, ConnectionId, Delivery, Point, RenderSurface, SessionCommand, SessionCoordinator,
    SessionEvent, Stroke,
};

/// Rebuilds the strokes a client has on screen from the primitives it issued.
#[derive(Default)]
struct Canvas {
    strokes: Vec<Vec<Point>>,
    path: Vec<Point>,
}

impl RenderSurface for Canvas {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commit();
        self.path = vec![Point::new(x, y)];
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Point::new(x, y));
    }

    fn stroke(&mut self) {}

    fn clear_surface(&mut self) {
        self.strokes.clear();
        self.path.clear();
    }
}

impl Canvas {
    fn commit(&mut self) {
        if !self.path.is_empty() {
            self.strokes.push(std::mem::take(&mut self.path));
        }
    }
}

/// Coordinator plus clients, with every message passed through its JSON form.
struct Harness {
    coordinator: SessionCoordinator,
    clients: HashMap<ConnectionId, ClientSession<Canvas>>,
    inbox: HashMap<ConnectionId, Vec<String>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            coordinator: SessionCoordinator::new(),
            clients: HashMap::new(),
            inbox: HashMap::new(),
        }
    }

    fn connect(&mut self, id: ConnectionId) {
        self.clients.insert(id, ClientSession::new(Canvas::default()));
        let deliveries = self.coordinator.on_connect(id);
        self.deliver(deliveries);
    }

    fn disconnect(&mut self, id: ConnectionId) {
        self.coordinator.on_disconnect(id);
        self.clients.remove(&id);
    }

    fn send(&mut self, from: ConnectionId, command: SessionCommand) {
        let json = command.to_json().expect("");
        let command = SessionCommand::from_json(&json).expect("");
        let deliveries = self.coordinator.on_command(from, command);
        self.deliver(deliveries);
    }

    fn draw(&mut self, from: ConnectionId, points: &[(f64, f64)]) {
        let client = self.clients.get_mut(&from).expect("client");
        let (x, y) = points[0];
        client.gesture_start(x, y);
        for (x, y) in &points[1..] {
            client.gesture_move(*x, *y);
        }
        client.surface_mut().commit();
        if let Some(command) = client.gesture_end() {
            self.send(from, command);
        }
    }

    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            let json = event.to_json().expect("");
            self.inbox.entry(to).or_default().push(json.clone());
            if let Some(client) = self.clients.get_mut(&to) {
                client.handle_message(&json);
                client.surface_mut().commit();
            }
        }
    }

    fn received(&self, id: ConnectionId) -> &[String] {
        self.inbox.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn canvas(&self, id: ConnectionId) -> &[Vec<Point>] {
        &self.clients[&id].surface().strokes
    }
}

fn points(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|(x, y)| Point::new(*x, *y)).collect()
}

#[test]
fn draw_is_relayed_to_others_but_not_echoed() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);

    h.draw(1, &[(0.0, 0.0), (5.0, 5.0)]);

    assert_eq!(h.received(1), &[r#"{"type":"init","data":[]}"#]);
    assert_eq!(
        h.received(2),
        &[
            r#"{"type":"init","data":[]}"#,
            r#"{"type":"draw","data":[{"x":0.0,"y":0.0},{"x":5.0,"y":5.0}]}"#,
        ]
    );
}

#[test]
fn late_joiner_receives_history_once_in_init() {
    let mut h = Harness::new();
    h.connect(1);
    h.draw(1, &[(1.0, 1.0)]);

    h.connect(2);

    assert_eq!(
        h.received(2),
        &[r#"{"type":"init","data":[[{"x":1.0,"y":1.0}]]}"#]
    );
    assert_eq!(h.canvas(2), &[points(&[(1.0, 1.0)])]);
}

#[test]
fn clear_reaches_everyone_and_resets_init() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);
    h.draw(1, &[(0.0, 0.0), (2.0, 2.0)]);

    let clear = h.clients[&2].request_clear();
    h.send(2, clear);

    assert_eq!(h.received(1).last().map(String::as_str), Some(r#"{"type":"clear"}"#));
    assert_eq!(h.received(2).last().map(String::as_str), Some(r#"{"type":"clear"}"#));
    assert!(h.canvas(1).is_empty());
    assert!(h.canvas(2).is_empty());

    h.connect(3);
    assert_eq!(h.received(3), &[r#"{"type":"init","data":[]}"#]);
}

#[test]
fn init_holds_only_strokes_after_latest_clear() {
    let mut h = Harness::new();
    h.connect(1);
    h.draw(1, &[(0.0, 0.0)]);
    h.draw(1, &[(1.0, 1.0)]);
    h.send(1, SessionCommand::Clear);
    h.draw(1, &[(2.0, 2.0), (3.0, 3.0)]);
    h.draw(1, &[(4.0, 4.0)]);

    h.connect(2);

    assert_eq!(
        h.coordinator.history(),
        &[
            Stroke::from(points(&[(2.0, 2.0), (3.0, 3.0)])),
            Stroke::from(points(&[(4.0, 4.0)])),
        ]
    );
    assert_eq!(h.canvas(2), h.canvas(1));
}

#[test]
fn every_client_converges_on_the_same_strokes() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);
    h.draw(1, &[(0.0, 0.0), (1.0, 0.0)]);
    h.draw(2, &[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
    h.connect(3);
    h.draw(3, &[(9.0, 9.0)]);
    h.draw(1, &[(5.0, 5.0), (6.0, 6.0)]);

    let mut expected = h
        .coordinator
        .history()
        .iter()
        .map(|s| s.points().to_vec())
        .collect::<Vec<_>>();
    expected.sort_by(|a, b| a[0].x.partial_cmp(&b[0].x).expect("").then(a.len().cmp(&b.len())));

    for id in 1..=3 {
        let mut seen = h.canvas(id).to_vec();
        seen.sort_by(|a, b| a[0].x.partial_cmp(&b[0].x).expect("").then(a.len().cmp(&b.len())));
        assert_eq!(seen, expected, "client {}", id);
    }
}

#[test]
fn relayed_stroke_replays_captured_points_in_order() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);

    let raw = [(3.0, 1.0), (1.0, 3.0), (2.5, 2.5), (3.0, 1.0)];
    h.draw(1, &raw);

    assert_eq!(h.canvas(2), &[points(&raw)]);
    assert_eq!(h.canvas(1), h.canvas(2));
}

#[test]
fn tap_without_movement_round_trips() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);

    h.draw(1, &[(4.0, 2.0)]);

    assert_eq!(
        h.received(2).last().map(String::as_str),
        Some(r#"{"type":"draw","data":[{"x":4.0,"y":2.0}]}"#)
    );
    assert_eq!(h.canvas(2), &[points(&[(4.0, 2.0)])]);
}

#[test]
fn nothing_is_sent_after_disconnect() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);
    h.disconnect(2);

    h.draw(1, &[(0.0, 0.0)]);
    h.send(1, SessionCommand::Clear);

    assert_eq!(h.received(2), &[r#"{"type":"init","data":[]}"#]);
}

#[test]
fn gesture_end_without_start_sends_nothing() {
    let mut client = ClientSession::new(Canvas::default());
    client.gesture_move(1.0, 1.0);
    assert!(client.gesture_end().is_none());
}

#[test]
fn malformed_events_are_ignored() {
    let mut client = ClientSession::new(Canvas::default());
    client.handle_message(r#"{"type":"draw","data":[{"x":1,"y":1}]}"#);
    client.surface_mut().commit();

    client.handle_message(r#"{"type":"explode"}"#);
    client.handle_message("{");

    assert_eq!(client.surface().strokes, vec![points(&[(1.0, 1.0)])]);
}

#[test]
fn remote_stroke_during_gesture_keeps_local_path() {
    let mut client = ClientSession::new(Canvas::default());
    client.gesture_start(0.0, 0.0);
    client.gesture_move(1.0, 1.0);

    client.handle_event(SessionEvent::Draw(Stroke::from(points(&[(7.0, 7.0), (8.0, 8.0)]))));
    assert!(client.is_capturing());
    assert_eq!(client.surface().path, points(&[(1.0, 1.0)]));

    client.gesture_move(2.0, 2.0);
    let command = client.gesture_end().expect("draw");
    assert_eq!(
        command,
        SessionCommand::Draw(Stroke::from(points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])))
    );
}

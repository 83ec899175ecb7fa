//! Tracing output of the engine: transition events, commit spans, refusals.
//!
//! Run:
//!   cargo test -p fgrid-runtime --test engine_tracing

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fgrid_core::{Direction, LayoutHints};
use fgrid_runtime::{FnHost, GridEngine};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    span_index: HashMap<u64, usize>,
    events: Vec<CapturedEvent>,
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Captured>>);

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let mut captured = self.0.lock().unwrap();
        let index = captured.spans.len();
        captured.spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
        captured.span_index.insert(id.into_u64(), index);
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        values.record(&mut visitor);
        let mut captured = self.0.lock().unwrap();
        if let Some(&index) = captured.span_index.get(&id.into_u64()) {
            captured.spans[index].fields.extend(visitor.0);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());
        self.0.lock().unwrap().events.push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> Captured {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    std::mem::take(&mut *capture.0.lock().unwrap())
}

fn engine() -> GridEngine<LayoutHints, FnHost<impl FnMut(Vec<LayoutHints>)>> {
    GridEngine::new(
        vec![LayoutHints::span(6); 2],
        FnHost::new(|_items: Vec<LayoutHints>| {}),
    )
}

#[test]
fn every_transition_is_logged_with_ids() {
    let captured = with_capture(|| {
        let mut e = engine();
        e.pointer_down_right_edge(0, 600.0, 1200.0);
        e.pointer_move(700.0);
        e.pointer_up(700.0);
    });

    let transitions: Vec<&CapturedEvent> = captured
        .events
        .iter()
        .filter(|e| e.target == "fgrid.engine" && e.message == "grid transition")
        .collect();
    assert_eq!(transitions.len(), 3, "{:?}", captured.events);

    let ids: Vec<&str> = transitions
        .iter()
        .map(|e| e.fields["transition_id"].as_str())
        .collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(transitions[0].fields["effect"], "resize_started");
    assert_eq!(transitions[0].fields["to"], "resizing_right");
    assert_eq!(transitions[2].fields["effect"], "committed");
    assert_eq!(transitions[2].fields["to"], "idle");
}

#[test]
fn commit_runs_inside_grid_commit_span() {
    let captured = with_capture(|| {
        let mut e = engine();
        e.swap(0, Direction::Forward);
    });

    let span = captured
        .spans
        .iter()
        .find(|s| s.name == "grid.commit")
        .expect("grid.commit span");
    assert_eq!(span.fields["kind"], "swap");
    assert_eq!(span.fields["items"], "2");
    assert!(span.fields.contains_key("state_hash"));

    let committed = captured
        .events
        .iter()
        .find(|e| e.message == "layout committed")
        .expect("commit event");
    assert_eq!(committed.parent_span_name.as_deref(), Some("grid.commit"));
}

#[test]
fn refused_input_logs_a_warning() {
    let captured = with_capture(|| {
        let mut e = engine();
        e.nudge(0, Direction::Backward);
        e.pointer_move(10.0);
    });

    let warnings: Vec<&CapturedEvent> = captured
        .events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(warnings[0].message, "grid input refused");
    assert!(warnings[0].fields["effect"].contains("OutOfBounds"));
}

#[test]
fn removal_logs_the_abandoned_gesture() {
    let captured = with_capture(|| {
        let mut e = engine();
        e.pointer_down_right_edge(0, 600.0, 1200.0);
        e.remove(1);
    });

    let effects: Vec<(&str, &str)> = captured
        .events
        .iter()
        .filter(|e| e.message == "grid transition")
        .map(|e| (e.fields["transition_id"].as_str(), e.fields["effect"].as_str()))
        .collect();
    assert_eq!(
        effects,
        [("1", "resize_started"), ("2", "canceled"), ("3", "removed")]
    );
}

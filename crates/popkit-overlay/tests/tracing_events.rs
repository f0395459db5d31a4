#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use popkit_core::geometry::Vector;
use popkit_core::gesture::PanEvent;
use popkit_overlay::{OverlayController, OverlayStyle};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Default)]
struct Captured {
    messages: Vec<String>,
    saw_tick_span: bool,
}

struct OverlayTraceCapture {
    state: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for OverlayTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "overlay.tick" {
            self.state.lock().expect("trace lock").saw_tick_span = true;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(m) = msg.message {
            self.state.lock().expect("trace lock").messages.push(m);
        }
    }
}

#[test]
fn lifecycle_emits_structured_events() {
    let state = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(OverlayTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut c = OverlayController::new();
    c.set_style(OverlayStyle::Notification);
    c.set_timer(Some(Duration::from_secs(5)), None);
    c.present(None);
    c.present(None);
    c.tick(Duration::from_millis(500));
    c.pan(PanEvent::began());
    c.pan(PanEvent::ended(Vector::vertical(-1.0), Vector::ZERO));
    c.dismiss(None);
    c.tick(Duration::from_millis(500));

    let snapshot = state.lock().expect("trace lock");
    let has = |name: &str| snapshot.messages.iter().any(|m| m == name);
    assert!(has("overlay.transition"), "{:?}", snapshot.messages);
    assert!(has("overlay.ignored"), "expected ignored second present");
    assert!(has("overlay.timer"), "expected timer start event");
    assert!(has("overlay.drag_end"), "expected drag decision event");
    assert!(has("overlay.dismiss"));
    assert!(snapshot.saw_tick_span, "expected overlay.tick span");
}

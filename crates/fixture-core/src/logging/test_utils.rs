//! In-memory capture of tracing events for assertions in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// A captured tracing event.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    /// The log level.
    pub level: Level,
    /// The target module.
    pub target: String,
    /// The formatted message.
    pub message: String,
    /// Structured fields other than `message`, formatted with `Debug`.
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Look up a structured field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Shared handle to the events recorded by a capture subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedLogs {
    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        // A panicking test thread must not hide the events from the others.
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    /// Whether any event at `level` contains `message_contains`.
    pub fn has_event(&self, level: Level, message_contains: &str) -> bool {
        self.lock()
            .iter()
            .any(|e| e.level == level && e.message.contains(message_contains))
    }

    /// First event whose message contains `message_contains`.
    pub fn find(&self, message_contains: &str) -> Option<CapturedEvent> {
        self.lock()
            .iter()
            .find(|e| e.message.contains(message_contains))
            .cloned()
    }

    /// Whether any event has a field value containing `needle`.
    pub fn any_field_contains(&self, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|e| e.fields.iter().any(|(_, v)| v.contains(needle)))
    }
}

struct CaptureLayer {
    logs: CapturedLogs,
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push((field.name().to_owned(), value.to_owned()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let val = format!("{value:?}");
        if field.name() == "message" {
            self.message = val;
        } else {
            self.fields.push((field.name().to_owned(), val));
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.logs.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Install a thread-local subscriber that records every event.
///
/// Keep the returned guard alive for the duration of the test. Because the
/// subscriber is thread-local, async tests must run on a current-thread
/// runtime (the `#[tokio::test]` default).
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let layer = CaptureLayer { logs: logs.clone() };

    let guard = tracing_subscriber::registry()
        .with(layer)
        .with(LevelFilter::TRACE)
        .set_default();
    (logs, guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_level_and_message() {
        let (logs, _guard) = capture_logs();
        tracing::warn!("credentials rejected");
        assert!(logs.has_event(Level::WARN, "credentials rejected"));
        assert!(!logs.has_event(Level::INFO, "credentials rejected"));
    }

    #[test]
    fn records_structured_fields() {
        let (logs, _guard) = capture_logs();
        tracing::info!(username = "testuser", active = 3, "session created");

        let event = logs.find("session created").unwrap();
        assert_eq!(event.field("username"), Some("testuser"));
        assert_eq!(event.field("active"), Some("3"));
        assert!(logs.any_field_contains("testuser"));
    }

    #[test]
    fn captures_target() {
        let (logs, _guard) = capture_logs();
        tracing::debug!(target: "fixture_server::handlers", "hello");
        assert_eq!(logs.events()[0].target, "fixture_server::handlers");
    }

    #[test]
    fn events_outside_guard_are_not_recorded() {
        let (logs, guard) = capture_logs();
        drop(guard);
        tracing::info!("after drop");
        assert!(logs.events().is_empty());
    }
}

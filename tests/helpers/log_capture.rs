//! Tracing layer that records emitted events for assertions.

use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// One captured event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
	pub level: Level,
	pub message: String,
}

/// A tracing layer that captures event messages into a shared vector.
struct LogCapture {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.events.lock().unwrap().push(CapturedEvent {
			level: *event.metadata().level(),
			message: visitor.message,
		});
	}
}

/// Captured events for the lifetime of the guard on the current thread.
pub struct Captured {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
	_guard: DefaultGuard,
}

impl Captured {
	/// Messages of events at `level`, in emission order.
	pub fn messages(&self, level: Level) -> Vec<String> {
		self.events
			.lock()
			.unwrap()
			.iter()
			.filter(|event| event.level == level)
			.map(|event| event.message.clone())
			.collect()
	}

	pub fn warnings(&self) -> Vec<String> {
		self.messages(Level::WARN)
	}

	pub fn errors(&self) -> Vec<String> {
		self.messages(Level::ERROR)
	}
}

/// Installs a capturing subscriber as the thread default.
pub fn capture_logs() -> Captured {
	let events = Arc::new(Mutex::new(Vec::new()));
	let layer = LogCapture {
		events: events.clone(),
	};
	let guard = tracing_subscriber::registry().with(layer).set_default();
	Captured {
		events,
		_guard: guard,
	}
}

/// Exact warning text for a hard-coded literal.
pub fn hard_coded_message(key: &str, kind: &str) -> String {
	format!(
		"`{}` contains a hard-coded {}. It will be shared across all instances of this factory. Consider using a factory function.",
		key, kind
	)
}

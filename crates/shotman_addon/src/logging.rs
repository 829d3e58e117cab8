// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logging setup.
//!
//! Log output goes to stderr through `tracing_subscriber::fmt`. Warnings and
//! errors are also forwarded as [`Report`]s over a channel so the host can
//! show them in its info area.

use crate::config::AddonConfig;
use crate::error::{AddonError, Result};
use crate::host::{Report, ReportLevel};
use std::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// A `tracing_subscriber::Layer` that forwards warnings and errors over an
/// `mpsc` channel.
pub struct ReportBridge {
    sender: mpsc::Sender<Report>,
}

impl ReportBridge {
    /// Create a new bridge and return `(layer, receiver)`.
    pub fn new() -> (Self, mpsc::Receiver<Report>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl<S> tracing_subscriber::Layer<S> for ReportBridge
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let level = match *event.metadata().level() {
            tracing::Level::WARN => ReportLevel::Warning,
            tracing::Level::ERROR => ReportLevel::Error,
            _ => return,
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        // Receiver dropped means nobody displays reports any more
        let _ = self.sender.send(Report::new(
            level,
            event.metadata().target(),
            visitor.message,
        ));
    }
}

/// Visitor that extracts the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else if self.message.is_empty() {
            self.message = format!("{} = {:?}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else if self.message.is_empty() {
            self.message = format!("{} = {}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {}", field.name(), value));
        }
    }
}

/// Build the event filter for a configuration
pub fn env_filter(config: &AddonConfig) -> Result<EnvFilter> {
    let level = if config.debug { "debug" } else { "info" };
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    for crate_name in ["shotman_addon", "shotman_interchange", "shotman_sequencer"] {
        let directive = format!("{crate_name}={level}")
            .parse::<Directive>()
            .map_err(|e| AddonError::Logging(format!("{e}")))?;
        filter = filter.add_directive(directive);
    }

    if let Some(extra) = config.log_filter.as_deref() {
        for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let directive = directive
                .parse::<Directive>()
                .map_err(|e| AddonError::Logging(format!("{directive}: {e}")))?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

/// Install the global subscriber.
///
/// Returns the receiver of forwarded warnings and errors. Fails if a global
/// subscriber is already set.
pub fn init(config: &AddonConfig) -> Result<mpsc::Receiver<Report>> {
    let (bridge_layer, receiver) = ReportBridge::new();

    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(bridge_layer)
        .try_init()
        .map_err(|e| AddonError::Logging(e.to_string()))?;

    tracing::info!("Shot Manager v{} logging initialized", env!("CARGO_PKG_VERSION"));
    Ok(receiver)
}

//! Walkthrough of an event channel's lifecycle
//!
//! Registers two handlers, invokes the channel as they come and go, and
//! writes a transcript of what each handler observed.

use std::io::Write;
use std::sync::Arc;

use fanout_events::{ChannelConfig, EventChannel, Handler, HandlerError};
use parking_lot::Mutex;
use tracing::info;

/// Output shared between the demo and its handlers
pub type SharedWriter<W> = Arc<Mutex<W>>;

/// Handler that prints `" - {label}: {event}"` to the shared writer
pub fn printing_handler<W>(out: &SharedWriter<W>, label: &str) -> Handler<String>
where
    W: Write + Send + 'static,
{
    let out = Arc::clone(out);
    let label = label.to_string();
    Handler::new(move |event: &String| {
        writeln!(out.lock(), " - {}: {}", label, event)
            .map_err(|e| HandlerError::with_source(format!("{} could not write", label), e))
    })
}

fn heading<W: Write>(out: &SharedWriter<W>, text: &str, first: bool) -> std::io::Result<()> {
    let mut out = out.lock();
    if !first {
        writeln!(out)?;
    }
    writeln!(out, "- {}", text)
}

/// Run the four-call walkthrough
///
/// 1. one handler registered
/// 2. a second handler registered
/// 3. both removed, nothing fires
/// 4. both registered again as a batch
pub fn run_demo<W>(config: ChannelConfig, out: SharedWriter<W>) -> anyhow::Result<()>
where
    W: Write + Send + 'static,
{
    let handler1 = printing_handler(&out, "Handler1");
    let handler2 = printing_handler(&out, "Handler2");

    let mut signal: EventChannel<String> = EventChannel::with_config(config);
    info!(channel = signal.name().unwrap_or("unnamed"), "Starting demo");

    signal += &handler1;
    heading(&out, "First Call", true)?;
    signal.invoke(&"First Call".to_string())?;

    signal += &handler2;
    heading(&out, "Second Call", false)?;
    signal.invoke(&"Second Call".to_string())?;

    signal -= &handler1;
    signal -= &handler2;
    heading(&out, "Third Call(no handlers)", false)?;
    signal.invoke(&"Third Call".to_string())?;

    signal += [handler1, handler2];
    heading(&out, "Fourth Call", false)?;
    signal.invoke(&"Fourth Call".to_string())?;

    info!(handler_count = signal.len(), "Demo finished");
    Ok(())
}

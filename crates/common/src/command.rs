//! Task command envelope — published on per-task command channels.
//!
//! A `Command` pairs an operation with an optional configuration payload and
//! a `Responder`. The responder carries the caller's completion/rejection
//! continuations: the task fires it once when the operation settles, or never
//! if the command is dropped. Callers must not assume a reply will arrive.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Operation requested from a task worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskOp {
    Start,
    Stop,
    Pause,
    Resume,
    Query,
    Configure,
    Clear,
    Read,
    Write,
}

impl TaskOp {
    /// Stable lowercase name (for logging).
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Query => "query",
            Self::Configure => "configure",
            Self::Clear => "clear",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for TaskOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type CompleteFn = Box<dyn FnOnce() + Send>;
type RejectFn = Box<dyn FnOnce(i32, &str) + Send>;

struct Continuations {
    on_complete: Option<CompleteFn>,
    on_reject: Option<RejectFn>,
}

/// Completion/rejection continuations for a single command.
///
/// The pair fires at most once: the first call to [`resolve`](Self::resolve)
/// or [`reject`](Self::reject) consumes both continuations, later calls are
/// no-ops. A responder that is never fired is also valid — tasks may drop
/// commands without settling them.
#[derive(Clone)]
pub struct Responder {
    inner: Arc<Mutex<Option<Continuations>>>,
}

impl Responder {
    /// Responder with both continuations.
    pub fn new(on_complete: Option<CompleteFn>, on_reject: Option<RejectFn>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(Continuations {
                on_complete,
                on_reject,
            }))),
        }
    }

    /// Fire-and-forget responder.
    pub fn none() -> Self {
        Self::new(None, None)
    }

    /// Responder with only a completion continuation.
    pub fn on_complete(f: impl FnOnce() + Send + 'static) -> Self {
        Self::new(Some(Box::new(f)), None)
    }

    /// Responder whose completion *and* rejection run the same continuation.
    ///
    /// Used for failure-tolerant cascades where the next step proceeds
    /// whether or not the previous one succeeded.
    pub fn always(f: impl FnOnce() + Send + Clone + 'static) -> Self {
        let g = f.clone();
        Self::new(
            Some(Box::new(f)),
            Some(Box::new(move |_code, _message| g())),
        )
    }

    /// Settle as completed. Consumes the continuations on first call.
    pub fn resolve(&self) {
        if let Some(conts) = self.inner.lock().take() {
            if let Some(f) = conts.on_complete {
                f();
            }
        }
    }

    /// Settle as rejected with an error code and message.
    pub fn reject(&self, code: i32, message: &str) {
        if let Some(conts) = self.inner.lock().take() {
            if let Some(f) = conts.on_reject {
                f(code, message);
            }
        }
    }

    /// Whether the responder has already fired.
    pub fn is_spent(&self) -> bool {
        self.inner.lock().is_none()
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Command envelope published on a task command channel.
#[derive(Clone, Debug)]
pub struct Command {
    /// Requested operation.
    pub op: TaskOp,
    /// Optional configuration payload (JSON object).
    pub data: Option<Value>,
    /// Settled by the consuming task, at most once.
    pub responder: Responder,
}

impl Command {
    /// Command without payload.
    pub fn new(op: TaskOp, responder: Responder) -> Self {
        Self {
            op,
            data: None,
            responder,
        }
    }

    /// Command carrying a configuration payload.
    pub fn with_data(op: TaskOp, data: Value, responder: Responder) -> Self {
        Self {
            op,
            data: Some(data),
            responder,
        }
    }
}

//! Shared test harness: mock task workers, a recording UI sink, and a
//! fixture wiring an orchestrator to them through a fresh registry.

// Each test binary uses a different slice of the harness.
#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use nl_bus::{ChannelRegistry, Subscription};
use nl_common::{
    AppEvent, Command, EventSink, Priority, Responder, StatusEvent, SystemStartup, TaskOp,
};
use nl_control::{names, ControlOptions, Orchestrator};
use nl_settings::SettingsStore;

/// One command observed by a mock task.
#[derive(Clone, Debug)]
pub struct LoggedCommand {
    pub task: &'static str,
    pub op: TaskOp,
    pub data: Option<Value>,
}

/// Shared log of every command published to any mock task, in publish order.
#[derive(Clone, Default)]
pub struct CommandLog {
    entries: Arc<Mutex<Vec<LoggedCommand>>>,
}

impl CommandLog {
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn all(&self) -> Vec<LoggedCommand> {
        self.entries.lock().clone()
    }

    /// (task, op) pairs in publish order.
    pub fn sequence(&self) -> Vec<(&'static str, TaskOp)> {
        self.entries.lock().iter().map(|e| (e.task, e.op)).collect()
    }

    pub fn count(&self, task: &str, op: TaskOp) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.task == task && e.op == op)
            .count()
    }

    /// Position of the first (task, op) entry.
    pub fn position(&self, task: &str, op: TaskOp) -> Option<usize> {
        self.entries
            .lock()
            .iter()
            .position(|e| e.task == task && e.op == op)
    }

    /// Payloads of all Configure commands sent to a task.
    pub fn configs(&self, task: &str) -> Vec<Value> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.task == task && e.op == TaskOp::Configure)
            .filter_map(|e| e.data.clone())
            .collect()
    }
}

/// How a mock task settles incoming commands.
#[derive(Copy, Clone, Debug)]
pub enum Behavior {
    /// Complete immediately.
    Resolve,
    /// Reject immediately with this code/message.
    Reject(i32, &'static str),
    /// Keep the responder; the test settles it via [`MockTask::release_next`].
    Hold,
}

/// A task worker double: consumes one command channel, records every
/// command, and settles responders according to its behavior.
pub struct MockTask {
    pending: Arc<Mutex<Vec<Responder>>>,
    _subscription: Subscription,
}

impl MockTask {
    pub fn attach(
        registry: &ChannelRegistry,
        channel_name: &str,
        task: &'static str,
        log: &CommandLog,
        behavior: Behavior,
    ) -> Self {
        let channel = registry.channel::<Command>(channel_name);
        let entries = log.entries.clone();
        let pending: Arc<Mutex<Vec<Responder>>> = Arc::new(Mutex::new(Vec::new()));
        let held = pending.clone();

        let subscription = channel.subscribe(move |command| {
            entries.lock().push(LoggedCommand {
                task,
                op: command.op,
                data: command.data.clone(),
            });
            match behavior {
                Behavior::Resolve => command.responder.resolve(),
                Behavior::Reject(code, message) => command.responder.reject(code, message),
                Behavior::Hold => held.lock().push(command.responder.clone()),
            }
        });

        Self {
            pending,
            _subscription: subscription,
        }
    }

    /// Number of responders currently held.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Resolve the oldest held responder.
    pub fn release_next(&self) {
        let responder = self.pending.lock().remove(0);
        responder.resolve();
    }

    /// Resolve and forget everything currently held.
    pub fn drain_pending(&self) {
        let held: Vec<Responder> = self.pending.lock().drain(..).collect();
        for responder in held {
            responder.resolve();
        }
    }
}

/// Records every posted UI event with its priority.
#[derive(Default)]
pub struct RecordingSink {
    posts: Mutex<Vec<(AppEvent, Priority)>>,
}

impl RecordingSink {
    pub fn posts(&self) -> Vec<(AppEvent, Priority)> {
        self.posts.lock().clone()
    }

    pub fn count(&self, matcher: impl Fn(&AppEvent) -> bool) -> usize {
        self.posts.lock().iter().filter(|(e, _)| matcher(e)).count()
    }

    pub fn clear(&self) {
        self.posts.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn post(&self, event: AppEvent, priority: Priority) {
        self.posts.lock().push((event, priority));
    }
}

/// Per-task behaviors for a fixture; everything resolves by default.
#[derive(Copy, Clone)]
pub struct Behaviors {
    pub storage: Behavior,
    pub recorder: Behavior,
    pub logic_decoder: Behavior,
    pub logic_device: Behavior,
    pub radio_decoder: Behavior,
    pub radio_device: Behavior,
    pub fourier: Behavior,
}

impl Default for Behaviors {
    fn default() -> Self {
        Self {
            storage: Behavior::Resolve,
            recorder: Behavior::Resolve,
            logic_decoder: Behavior::Resolve,
            logic_device: Behavior::Resolve,
            radio_decoder: Behavior::Resolve,
            radio_device: Behavior::Resolve,
            fourier: Behavior::Resolve,
        }
    }
}

/// Orchestrator wired to seven mock tasks and a recording sink.
pub struct Fixture {
    pub registry: ChannelRegistry,
    pub control: Orchestrator,
    pub log: CommandLog,
    pub sink: Arc<RecordingSink>,
    pub storage: MockTask,
    pub recorder: MockTask,
    pub logic_decoder: MockTask,
    pub logic_device: MockTask,
    pub radio_decoder: MockTask,
    pub radio_device: MockTask,
    pub fourier: MockTask,
}

impl Fixture {
    pub fn new(behaviors: Behaviors) -> Self {
        Self::with_settings(behaviors, SettingsStore::new())
    }

    pub fn with_settings(behaviors: Behaviors, settings: SettingsStore) -> Self {
        // Surface orchestrator logs in failing tests.
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let registry = ChannelRegistry::new();
        let log = CommandLog::default();
        let sink = Arc::new(RecordingSink::default());

        let storage = MockTask::attach(
            &registry,
            names::STORAGE_COMMAND,
            "storage",
            &log,
            behaviors.storage,
        );
        let recorder = MockTask::attach(
            &registry,
            names::RECORDER_COMMAND,
            "recorder",
            &log,
            behaviors.recorder,
        );
        let logic_decoder = MockTask::attach(
            &registry,
            names::LOGIC_DECODER_COMMAND,
            "logic-decoder",
            &log,
            behaviors.logic_decoder,
        );
        let logic_device = MockTask::attach(
            &registry,
            names::LOGIC_DEVICE_COMMAND,
            "logic-device",
            &log,
            behaviors.logic_device,
        );
        let radio_decoder = MockTask::attach(
            &registry,
            names::RADIO_DECODER_COMMAND,
            "radio-decoder",
            &log,
            behaviors.radio_decoder,
        );
        let radio_device = MockTask::attach(
            &registry,
            names::RADIO_DEVICE_COMMAND,
            "radio-device",
            &log,
            behaviors.radio_device,
        );
        let fourier = MockTask::attach(
            &registry,
            names::FOURIER_COMMAND,
            "fourier",
            &log,
            behaviors.fourier,
        );

        let control = Orchestrator::new(
            &registry,
            settings,
            sink.clone(),
            ControlOptions::default(),
        );

        Self {
            registry,
            control,
            log,
            sink,
            storage,
            recorder,
            logic_decoder,
            logic_device,
            radio_decoder,
            radio_device,
            fourier,
        }
    }

    /// Deliver a startup event enabling every feature.
    pub fn startup(&self) {
        self.control.system_startup(&SystemStartup {
            features: Some(String::new()),
            devices: None,
        });
    }

    pub fn publish_status(&self, channel_name: &str, status: Value) {
        self.registry
            .channel::<StatusEvent>(channel_name)
            .publish(StatusEvent::from_value(&status));
    }

    /// Report a logic device by name, making the subsystem available.
    pub fn attach_logic_device(&self, name: &str) {
        self.publish_status(
            names::LOGIC_DEVICE_STATUS,
            json!({ "status": "idle", "name": name }),
        );
    }

    /// Report a radio device by name, making the subsystem available.
    pub fn attach_radio_device(&self, name: &str) {
        self.publish_status(
            names::RADIO_DEVICE_STATUS,
            json!({ "status": "idle", "name": name }),
        );
    }

    /// Mark both decoders enabled via their status streams.
    pub fn enable_decoders(&self) {
        self.publish_status(names::LOGIC_DECODER_STATUS, json!({ "status": "idle" }));
        self.publish_status(names::RADIO_DECODER_STATUS, json!({ "status": "idle" }));
    }

    /// Full bring-up: startup, both devices attached, decoders enabled,
    /// command log cleared for the assertions that follow. Responders held
    /// back by bring-up commands are settled so held-behavior tests see
    /// only their own commands.
    pub fn ready(&self) {
        self.startup();
        self.attach_logic_device("logic.dslogic://usb-2-7");
        self.attach_radio_device("radio.airspy://0x1a2b");
        self.enable_decoders();

        for task in [
            &self.storage,
            &self.recorder,
            &self.logic_decoder,
            &self.logic_device,
            &self.radio_decoder,
            &self.radio_device,
            &self.fourier,
        ] {
            task.drain_pending();
        }

        self.log.clear();
        self.sink.clear();
    }
}

/// Minimal 16-bit PCM WAV file with the given channel count.
pub fn write_wav(path: &std::path::Path, channels: u16) {
    let sample_rate: u32 = 48_000;
    let frames: u32 = 8;
    let block_align = channels * 2;
    let data_len = frames * block_align as u32;
    let byte_rate = sample_rate * block_align as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);

    std::fs::write(path, bytes).expect("write wav");
}

//! `nl-common` — Shared types, events, and errors for the NFC Lab capture engine.
//!
//! This crate is the foundation that the bus, settings, and control crates
//! depend on. It defines the core abstractions:
//!
//! - **Commands**: `Command`, `TaskOp`, `Responder` (the task command envelope)
//! - **Control events**: `ControlEvent` and its per-command parameter structs
//! - **Status**: `StatusEvent`, `TaskStatus`, `OperatingState` (task snapshots)
//! - **Data flow**: `RawFrame`, `SignalBuffer` (decoded frames and samples)
//! - **Capabilities**: `Capability`, `CapabilityFilter` (feature allowlisting)
//! - **UI surface**: `AppEvent`, `Priority`, `EventSink` (posted events)

pub mod caps;
pub mod command;
pub mod control;
pub mod device;
pub mod frame;
pub mod signal;
pub mod status;
pub mod ui;

// Re-export commonly used items at crate root
pub use caps::{Capability, CapabilityFilter};
pub use command::{Command, Responder, TaskOp};
pub use control::{
    ControlEvent, FourierParams, Iso7816Params, LogicDecoderParams, LogicDeviceParams,
    ProtocolParams, RadioDecoderParams, RadioDeviceParams, ReadFileParams, StartParams,
    SystemStartup, WriteFileParams,
};
pub use device::device_type_of;
pub use frame::{FramePhase, FrameTech, FrameType, RawFrame};
pub use signal::{SignalBuffer, SignalKind};
pub use status::{OperatingState, StatusEvent, TaskStatus};
pub use ui::{AppEvent, EventSink, Priority};

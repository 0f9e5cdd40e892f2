//! Task command senders.
//!
//! One method per (task, operation) pair the orchestrator issues. Every
//! sender publishes a single command on the task's command channel; the
//! responder travels inside the command and is settled by the consuming
//! task, or never.

use serde_json::Value;
use tracing::{debug, info};

use nl_bus::Channel;
use nl_common::{Command, Responder, TaskOp};

use crate::orchestrator::Inner;

impl Inner {
    fn send(&self, channel: &Channel<Command>, op: TaskOp, responder: Responder) {
        debug!(channel = channel.name(), op = %op, "Publishing task command");
        channel.publish(Command::new(op, responder));
    }

    fn send_data(&self, channel: &Channel<Command>, op: TaskOp, data: Value, responder: Responder) {
        debug!(channel = channel.name(), op = %op, "Publishing task command");
        channel.publish(Command::with_data(op, data, responder));
    }

    // --- logic decoder -----------------------------------------------------

    pub(crate) fn task_logic_decoder_start(&self, responder: Responder) {
        info!("start logic decoder task");
        self.send(&self.channels.logic_decoder_command, TaskOp::Start, responder);
    }

    pub(crate) fn task_logic_decoder_config(&self, data: Value, responder: Responder) {
        info!("configure logic decoder task");
        self.send_data(
            &self.channels.logic_decoder_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }

    // --- radio decoder -----------------------------------------------------

    pub(crate) fn task_radio_decoder_start(&self, responder: Responder) {
        info!("start radio decoder task");
        self.send(&self.channels.radio_decoder_command, TaskOp::Start, responder);
    }

    pub(crate) fn task_radio_decoder_config(&self, data: Value, responder: Responder) {
        info!("configure radio decoder task");
        self.send_data(
            &self.channels.radio_decoder_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }

    // --- logic device ------------------------------------------------------

    pub(crate) fn task_logic_device_start(&self, responder: Responder) {
        info!("start logic device task");
        self.send(&self.channels.logic_device_command, TaskOp::Start, responder);
    }

    pub(crate) fn task_logic_device_stop(&self, responder: Responder) {
        info!("stop logic device task");
        self.send(&self.channels.logic_device_command, TaskOp::Stop, responder);
    }

    pub(crate) fn task_logic_device_pause(&self, responder: Responder) {
        info!("pause logic device task");
        self.send(&self.channels.logic_device_command, TaskOp::Pause, responder);
    }

    pub(crate) fn task_logic_device_resume(&self, responder: Responder) {
        info!("resume logic device task");
        self.send(&self.channels.logic_device_command, TaskOp::Resume, responder);
    }

    pub(crate) fn task_logic_device_config(&self, data: Value, responder: Responder) {
        info!("configure logic device task");
        self.send_data(
            &self.channels.logic_device_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }

    // --- radio device ------------------------------------------------------

    pub(crate) fn task_radio_device_start(&self, responder: Responder) {
        info!("start radio device task");
        self.send(&self.channels.radio_device_command, TaskOp::Start, responder);
    }

    pub(crate) fn task_radio_device_stop(&self, responder: Responder) {
        info!("stop radio device task");
        self.send(&self.channels.radio_device_command, TaskOp::Stop, responder);
    }

    pub(crate) fn task_radio_device_pause(&self, responder: Responder) {
        info!("pause radio device task");
        self.send(&self.channels.radio_device_command, TaskOp::Pause, responder);
    }

    pub(crate) fn task_radio_device_resume(&self, responder: Responder) {
        info!("resume radio device task");
        self.send(&self.channels.radio_device_command, TaskOp::Resume, responder);
    }

    pub(crate) fn task_radio_device_config(&self, data: Value, responder: Responder) {
        info!("configure radio device task");
        self.send_data(
            &self.channels.radio_device_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }

    // --- spectrum ----------------------------------------------------------

    pub(crate) fn task_fourier_config(&self, data: Value, responder: Responder) {
        info!("configure fourier task");
        self.send_data(
            &self.channels.fourier_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }

    // --- recorder ----------------------------------------------------------

    pub(crate) fn task_recorder_read(&self, data: Value, responder: Responder) {
        info!("start recorder task to read file");
        self.send_data(&self.channels.recorder_command, TaskOp::Read, data, responder);
    }

    pub(crate) fn task_recorder_write(&self, data: Value, responder: Responder) {
        info!("start recorder task to write file");
        self.send_data(&self.channels.recorder_command, TaskOp::Write, data, responder);
    }

    pub(crate) fn task_recorder_stop(&self, responder: Responder) {
        info!("stop recorder task");
        self.send(&self.channels.recorder_command, TaskOp::Stop, responder);
    }

    // --- trace storage -----------------------------------------------------

    pub(crate) fn task_storage_read(&self, data: Value, responder: Responder) {
        info!("start storage task to read frames");
        self.send_data(&self.channels.storage_command, TaskOp::Read, data, responder);
    }

    pub(crate) fn task_storage_write(&self, data: Value, responder: Responder) {
        info!("start storage task to write frames");
        self.send_data(&self.channels.storage_command, TaskOp::Write, data, responder);
    }

    pub(crate) fn task_storage_clear(&self, responder: Responder) {
        info!("clear storage task buffers");
        self.send(&self.channels.storage_command, TaskOp::Clear, responder);
    }

    pub(crate) fn task_storage_config(&self, data: Value, responder: Responder) {
        info!("configure storage task");
        self.send_data(
            &self.channels.storage_command,
            TaskOp::Configure,
            data,
            responder,
        );
    }
}

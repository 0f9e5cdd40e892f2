//! Control dispatch tests: startup initialization, the Start sequencing
//! diamond, stop/pause/resume fan-out, and file read/write routing.

mod support;

use serde_json::json;

use nl_common::{ControlEvent, ReadFileParams, StartParams, TaskOp, WriteFileParams};

use support::{write_wav, Behavior, Behaviors, Fixture};

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[test]
fn startup_initializes_allowed_subsystems_and_storage() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.startup();

    for task in [
        "logic-device",
        "logic-decoder",
        "radio-device",
        "radio-decoder",
        "fourier",
        "storage",
    ] {
        assert_eq!(
            fixture.log.count(task, TaskOp::Configure),
            1,
            "expected one Configure for {task}"
        );
    }

    // With no device attached yet, initialization still enables the tasks.
    let decoder_config = &fixture.log.configs("radio-decoder")[0];
    assert_eq!(decoder_config, &json!({ "enabled": true }));

    let fourier_config = &fixture.log.configs("fourier")[0];
    assert_eq!(fourier_config, &json!({ "enabled": true }));

    // The logic device gets a firmware path even before a device attaches.
    let device_config = &fixture.log.configs("logic-device")[0];
    assert!(device_config.get("firmwarePath").is_some());

    // Storage receives its working directory unconditionally.
    let storage_config = &fixture.log.configs("storage")[0];
    assert!(storage_config.get("tempPath").is_some());
}

#[test]
fn startup_feature_filter_gates_subsystems() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.control.system_startup(&nl_common::SystemStartup {
        features: Some("radio.device|radio.decode".into()),
        devices: None,
    });

    assert_eq!(fixture.log.count("radio-device", TaskOp::Configure), 1);
    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Configure), 1);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Configure), 0);
    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Configure), 0);
    assert_eq!(fixture.log.count("fourier", TaskOp::Configure), 0);

    // Storage initialization is not feature-gated.
    assert_eq!(fixture.log.count("storage", TaskOp::Configure), 1);
}

#[test]
fn startup_without_features_initializes_only_storage() {
    let fixture = Fixture::new(Behaviors::default());
    fixture
        .control
        .system_startup(&nl_common::SystemStartup::default());

    assert_eq!(fixture.log.count("storage", TaskOp::Configure), 1);
    assert_eq!(fixture.log.sequence().len(), 1);
}

// ---------------------------------------------------------------------------
// Start sequencing
// ---------------------------------------------------------------------------

#[test]
fn start_with_recording_runs_storage_recorder_then_decoders() {
    let fixture = Fixture::new(Behaviors {
        storage: Behavior::Hold,
        recorder: Behavior::Hold,
        ..Default::default()
    });
    fixture.ready();

    fixture.control.handle(&ControlEvent::Start(StartParams {
        storage_path: Some("/tmp/capture.wav".into()),
    }));

    // Only the storage clear goes out first.
    assert_eq!(fixture.log.sequence(), vec![("storage", TaskOp::Clear)]);

    // Clearing completes: the recorder write follows, decoders still idle.
    fixture.storage.release_next();
    assert_eq!(fixture.log.count("recorder", TaskOp::Write), 1);
    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 0);

    let write = &fixture.log.all()[1];
    assert_eq!(
        write.data.as_ref().unwrap(),
        &json!({ "storagePath": "/tmp/capture.wav" })
    );

    // Recorder confirms: both subsystem chains are unlocked.
    fixture.recorder.release_next();

    let clear_at = fixture.log.position("storage", TaskOp::Clear).unwrap();
    let write_at = fixture.log.position("recorder", TaskOp::Write).unwrap();
    let logic_decode_at = fixture.log.position("logic-decoder", TaskOp::Start).unwrap();
    let logic_device_at = fixture.log.position("logic-device", TaskOp::Start).unwrap();
    let radio_decode_at = fixture.log.position("radio-decoder", TaskOp::Start).unwrap();
    let radio_device_at = fixture.log.position("radio-device", TaskOp::Start).unwrap();

    assert!(clear_at < write_at);
    assert!(write_at < logic_decode_at);
    assert!(write_at < radio_decode_at);
    assert!(logic_decode_at < logic_device_at);
    assert!(radio_decode_at < radio_device_at);
}

#[test]
fn start_without_recording_skips_the_recorder() {
    let fixture = Fixture::new(Behaviors {
        storage: Behavior::Hold,
        ..Default::default()
    });
    fixture.ready();

    fixture
        .control
        .handle(&ControlEvent::Start(StartParams::default()));

    fixture.storage.release_next();

    assert_eq!(fixture.log.count("recorder", TaskOp::Write), 0);
    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 1);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Start), 1);
    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Start), 1);
}

#[test]
fn decoder_rejection_still_starts_the_device() {
    let fixture = Fixture::new(Behaviors {
        logic_decoder: Behavior::Reject(-7, "decoder unavailable"),
        ..Default::default()
    });
    fixture.ready();

    fixture
        .control
        .handle(&ControlEvent::Start(StartParams::default()));

    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 1);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Start), 1);
    // The healthy radio chain is unaffected.
    assert_eq!(fixture.log.count("radio-device", TaskOp::Start), 1);
}

#[test]
fn disabled_decoder_is_bypassed_on_start() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.startup();
    fixture.attach_logic_device("logic.dslogic://usb-2-7");
    fixture.attach_radio_device("radio.airspy://0x1a2b");
    // Decoders never report in: their enabled flags stay false.
    fixture.log.clear();

    fixture
        .control
        .handle(&ControlEvent::Start(StartParams::default()));

    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Start), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Start), 1);
}

#[test]
fn start_without_devices_issues_no_subsystem_commands() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.startup();
    fixture.enable_decoders();
    fixture.log.clear();

    fixture
        .control
        .handle(&ControlEvent::Start(StartParams::default()));

    assert_eq!(fixture.log.sequence(), vec![("storage", TaskOp::Clear)]);
}

// ---------------------------------------------------------------------------
// Stop / Pause / Resume / Clear
// ---------------------------------------------------------------------------

#[test]
fn stop_fans_out_to_devices_and_recorder() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::Start(StartParams {
        storage_path: Some("/tmp/capture.wav".into()),
    }));
    fixture.log.clear();

    fixture.control.handle(&ControlEvent::Stop);

    assert_eq!(fixture.log.count("logic-device", TaskOp::Stop), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Stop), 1);
    assert_eq!(fixture.log.count("recorder", TaskOp::Stop), 1);
}

#[test]
fn stop_without_recording_leaves_the_recorder_alone() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture
        .control
        .handle(&ControlEvent::Start(StartParams::default()));
    fixture.log.clear();

    fixture.control.handle(&ControlEvent::Stop);

    assert_eq!(fixture.log.count("recorder", TaskOp::Stop), 0);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Stop), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Stop), 1);
}

#[test]
fn pause_and_resume_touch_only_devices() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::Pause);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Pause), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Pause), 1);

    fixture.control.handle(&ControlEvent::Resume);
    assert_eq!(fixture.log.count("logic-device", TaskOp::Resume), 1);
    assert_eq!(fixture.log.count("radio-device", TaskOp::Resume), 1);

    // No decoder, recorder, or storage traffic for either.
    assert_eq!(fixture.log.sequence().len(), 4);
}

#[test]
fn pause_without_devices_is_a_no_op() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.startup();
    fixture.log.clear();

    fixture.control.handle(&ControlEvent::Pause);
    assert!(fixture.log.sequence().is_empty());
}

#[test]
fn clear_clears_storage() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::Clear);
    assert_eq!(fixture.log.sequence(), vec![("storage", TaskOp::Clear)]);
}

// ---------------------------------------------------------------------------
// ReadFile dispatch
// ---------------------------------------------------------------------------

#[test]
fn trace_file_goes_to_storage_without_decoders() {
    let fixture = Fixture::new(Behaviors {
        storage: Behavior::Hold,
        ..Default::default()
    });
    fixture.ready();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: "session.trz".into(),
    }));

    assert_eq!(fixture.log.sequence(), vec![("storage", TaskOp::Clear)]);

    fixture.storage.release_next();
    assert_eq!(fixture.log.count("storage", TaskOp::Read), 1);
    assert_eq!(
        fixture.log.all()[1].data.as_ref().unwrap(),
        &json!({ "fileName": "session.trz" })
    );

    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("recorder", TaskOp::Read), 0);
}

#[test]
fn multichannel_wav_routes_to_the_logic_decoder() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logic_capture.wav");
    write_wav(&path, 3);

    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: path.display().to_string(),
    }));

    let decode_at = fixture.log.position("logic-decoder", TaskOp::Start).unwrap();
    let read_at = fixture.log.position("recorder", TaskOp::Read).unwrap();
    assert!(decode_at < read_at);

    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("storage", TaskOp::Read), 0);
}

#[test]
fn mono_wav_routes_to_the_radio_decoder() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("radio_capture.wav");
    write_wav(&path, 1);

    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: path.display().to_string(),
    }));

    let decode_at = fixture.log.position("radio-decoder", TaskOp::Start).unwrap();
    let read_at = fixture.log.position("recorder", TaskOp::Read).unwrap();
    assert!(decode_at < read_at);

    assert_eq!(fixture.log.count("logic-decoder", TaskOp::Start), 0);
}

#[test]
fn wav_read_with_disabled_decoder_goes_straight_to_the_recorder() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stereo_capture.wav");
    write_wav(&path, 2);

    let fixture = Fixture::new(Behaviors::default());
    fixture.startup();
    fixture.log.clear();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: path.display().to_string(),
    }));

    assert_eq!(fixture.log.count("radio-decoder", TaskOp::Start), 0);
    assert_eq!(fixture.log.count("recorder", TaskOp::Read), 1);
}

#[test]
fn unreadable_file_aborts_the_dispatch() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: "/no/such/capture.wav".into(),
    }));

    assert!(fixture.log.sequence().is_empty());
}

#[test]
fn unknown_extension_is_ignored() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::ReadFile(ReadFileParams {
        file_name: "notes.txt".into(),
    }));

    assert!(fixture.log.sequence().is_empty());
}

// ---------------------------------------------------------------------------
// WriteFile dispatch
// ---------------------------------------------------------------------------

#[test]
fn trace_write_carries_range_bounds() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::WriteFile(WriteFileParams {
        file_name: "session.trz".into(),
        time_start: Some(1.5),
        time_end: Some(6.25),
        sample_rate: None,
    }));

    assert_eq!(fixture.log.count("storage", TaskOp::Write), 1);
    assert_eq!(
        fixture.log.all()[0].data.as_ref().unwrap(),
        &json!({ "fileName": "session.trz", "timeStart": 1.5, "timeEnd": 6.25 })
    );
}

#[test]
fn write_defaults_missing_bounds_to_zero() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::WriteFile(WriteFileParams {
        file_name: "session.trz".into(),
        time_start: None,
        time_end: None,
        sample_rate: None,
    }));

    assert_eq!(
        fixture.log.all()[0].data.as_ref().unwrap(),
        &json!({ "fileName": "session.trz", "timeStart": 0.0, "timeEnd": 0.0 })
    );
}

#[test]
fn non_trace_write_is_ignored() {
    let fixture = Fixture::new(Behaviors::default());
    fixture.ready();

    fixture.control.handle(&ControlEvent::WriteFile(WriteFileParams {
        file_name: "capture.wav".into(),
        time_start: None,
        time_end: None,
        sample_rate: None,
    }));

    assert!(fixture.log.sequence().is_empty());
}

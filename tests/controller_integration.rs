//! Integration tests for the controller
//!
//! These tests drive the controller through an in-memory host UI and scripted
//! prompts, covering the document/view lifecycle and event handling.

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{
    recording_controller, refreshes_of, FakeHost, MockUserPrompts, RecordingView, ScriptedPrompts,
    REFERENCE_LINE,
};
use signal_docview::controller::{AppEvent, Controller, FileActivity, HostUi};
use signal_docview::document::{DocumentKind, View};
use signal_docview::error::ErrorKind;
use signal_docview::types::{DocumentId, SignalValue, ViewId};
use std::io::Write;
use tempfile::NamedTempFile;

fn signal_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", contents).expect("write temp file");
    file
}

#[test]
fn test_new_document_becomes_active() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();

    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();

    assert_eq!(controller.document_count(), 1);
    let active = controller.active_document().expect("active document");
    assert_eq!(active.name(), "Test");
    assert_eq!(active.view_count(), 1);
    assert_eq!(host.labels(), vec!["Test"]);
    assert_eq!(
        controller.container_for_view(controller.active_view().unwrap()).unwrap(),
        host.selected.unwrap()
    );
}

#[test]
fn test_new_document_cancelled() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();

    controller
        .new_document(&mut host, &mut ScriptedPrompts::default())
        .unwrap();

    assert_eq!(controller.document_count(), 0);
    assert_eq!(host.container_count(), 0);
    assert!(controller.active_view().is_none());
}

#[test]
fn test_new_view_labels_are_numbered() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();

    controller.create_view_for_active_document(&mut host).unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();

    assert_eq!(host.labels(), vec!["Test", "Test:2", "Test:3"]);
    assert_eq!(controller.document_count(), 1);
    let active = controller.active_view().unwrap();
    assert_eq!(controller.active_document().unwrap().view_number(active), Some(3));
}

#[test]
fn test_new_view_without_active_document_is_noop() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();

    controller.create_view_for_active_document(&mut host).unwrap();

    assert_eq!(host.container_count(), 0);
}

#[test]
fn test_close_only_view_closes_document() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();

    controller.close_active_view(&mut host).unwrap();

    assert_eq!(controller.document_count(), 0);
    assert_eq!(host.container_count(), 0);
    assert!(controller.active_view().is_none());
    assert!(controller.active_document().is_none());
}

#[test]
fn test_close_one_of_two_views_keeps_document() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();
    let first = controller.active_view().unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();
    let second = controller.active_view().unwrap();

    controller.close_view(&mut host, second).unwrap();

    assert_eq!(controller.document_count(), 1);
    assert_eq!(host.labels(), vec!["Test"]);
    assert_eq!(controller.active_view(), Some(first));
    assert_eq!(controller.active_document().unwrap().view_count(), 1);
}

#[test]
fn test_close_with_no_documents_is_noop() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();

    controller.close_active_view(&mut host).unwrap();

    assert_eq!(controller.document_count(), 0);
}

#[test]
fn test_close_unknown_view_is_not_found() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();

    let err = controller.close_view(&mut host, ViewId::next()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(controller.document_count(), 1);
    assert_eq!(host.container_count(), 1);
}

#[test]
fn test_container_lookup_for_unknown_view_fails() {
    let (controller, _log) = recording_controller();

    let err = controller.container_for_view(ViewId::next()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_mutation_refreshes_every_view_once() {
    let (mut controller, log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();
    let first = controller.active_view().unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();
    let second = controller.active_view().unwrap();

    let before = (refreshes_of(&log, first), refreshes_of(&log, second));
    let timestamp = Utc.with_ymd_and_hms(2021, 2, 25, 1, 2, 3).unwrap().into();
    controller
        .active_signal_mut()
        .expect("signal document")
        .push_sample(SignalValue::new(1.5, timestamp));

    assert_eq!(refreshes_of(&log, first), before.0 + 1);
    assert_eq!(refreshes_of(&log, second), before.1 + 1);
}

#[test]
fn test_open_reference_file() {
    let (mut controller, log) = recording_controller();
    let mut host = FakeHost::default();
    let file = signal_file(&format!("{}\n", REFERENCE_LINE));

    let id = controller.open_path(&mut host, file.path()).unwrap();

    let document = controller.document(id).unwrap();
    let expected = Utc.with_ymd_and_hms(2021, 2, 25, 1, 2, 3).unwrap() + Duration::milliseconds(23);
    let samples = document.as_signal().unwrap().samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].value(), 4.0);
    assert_eq!(samples[0].timestamp(), expected);

    // The file name labels the tab and the new view saw the load
    let file_name = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(document.name(), file_name);
    let view = controller.active_view().unwrap();
    assert_eq!(refreshes_of(&log, view), 1);
}

#[test]
fn test_load_bad_line_leaves_samples_unchanged() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();
    let file = signal_file("abc\t2021-02-25T01:02:03\n");

    let document = controller.active_signal_mut().unwrap();
    let err = document.load(file.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatError);
    assert!(document.samples().is_empty());
}

#[test]
fn test_failed_open_keeps_empty_document() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let file = signal_file(&format!("{}\nabc\t2021-02-25T01:02:03\n", REFERENCE_LINE));

    let err = controller.open_path(&mut host, file.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatError);
    assert_eq!(controller.document_count(), 1);
    assert_eq!(host.container_count(), 1);
    let document = controller.active_document().unwrap();
    assert!(document.as_signal().unwrap().samples().is_empty());
}

#[test]
fn test_open_cancelled() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();

    let opened = controller
        .open_document(&mut host, &mut ScriptedPrompts::default())
        .unwrap();

    assert!(opened.is_none());
    assert_eq!(controller.document_count(), 0);
}

#[test]
fn test_save_without_active_document_does_nothing() {
    let (controller, _log) = recording_controller();
    let mut prompts = MockUserPrompts::new();
    prompts.expect_save_path().never();

    assert!(controller.save_active_document(&mut prompts).unwrap().is_none());
}

#[test]
fn test_save_writes_reference_format() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let source = signal_file(&format!("{}\n", REFERENCE_LINE));
    controller.open_path(&mut host, source.path()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("saved.txt");
    let suggested = controller.active_document().unwrap().name().to_string();

    let mut prompts = MockUserPrompts::new();
    let answer = target.clone();
    prompts
        .expect_save_path()
        .withf(move |name| name == suggested)
        .times(1)
        .return_const(Some(answer));

    let saved = controller.save_active_document(&mut prompts).unwrap();

    assert_eq!(saved.as_deref(), Some(target.as_path()));
    let contents = std::fs::read_to_string(&target).unwrap();
    assert_eq!(contents, format!("{}\n", REFERENCE_LINE));
}

#[test]
fn test_events_are_handled_in_order() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let mut prompts = ScriptedPrompts::named("Test");
    let events = controller.events();

    events.send(AppEvent::NewDocument);
    events.send(AppEvent::NewViewForActiveDocument);
    assert!(controller.has_pending_events());

    let activity = controller.process_events(&mut host, &mut prompts);

    assert!(activity.is_empty());
    assert!(prompts.errors.is_empty());
    assert!(!controller.has_pending_events());
    assert_eq!(host.labels(), vec!["Test", "Test:2"]);
}

#[test]
fn test_selection_change_switches_active_document() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("First"))
        .unwrap();
    let first_container = host.selected.unwrap();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Second"))
        .unwrap();
    assert_eq!(controller.active_document().unwrap().name(), "Second");

    host.select_container(first_container);
    controller.events().send(AppEvent::SelectionChanged);
    controller.process_events(&mut host, &mut ScriptedPrompts::default());

    assert_eq!(controller.active_document().unwrap().name(), "First");
}

#[test]
fn test_open_event_reports_activity() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let file = signal_file(&format!("{}\n", REFERENCE_LINE));
    let mut prompts = ScriptedPrompts {
        open: Some(file.path().to_path_buf()),
        ..ScriptedPrompts::default()
    };

    controller.events().send(AppEvent::OpenDocument);
    let activity = controller.process_events(&mut host, &mut prompts);

    assert_eq!(activity, vec![FileActivity::Opened(file.path().to_path_buf())]);
}

#[test]
fn test_missing_recent_file_is_reported() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.txt");

    let mut prompts = MockUserPrompts::new();
    prompts
        .expect_report_error()
        .withf(|title, message| title == "Open Document" && message.contains("gone.txt"))
        .times(1)
        .return_const(());

    controller.events().send(AppEvent::OpenRecent(missing));
    let activity = controller.process_events(&mut host, &mut prompts);

    assert!(activity.is_empty());
    assert_eq!(controller.document_count(), 0);
}

#[test]
fn test_failed_event_does_not_stop_queue() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    let mut prompts = ScriptedPrompts::named("Test");
    let events = controller.events();

    events.send(AppEvent::CloseView(ViewId::next()));
    events.send(AppEvent::NewDocument);
    controller.process_events(&mut host, &mut prompts);

    assert_eq!(prompts.errors.len(), 1);
    assert_eq!(prompts.errors[0].0, "Close View");
    assert_eq!(controller.document_count(), 1);
}

#[test]
fn test_number_after_detach_counts_remaining_views() {
    let (mut controller, _log) = recording_controller();
    let mut host = FakeHost::default();
    controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();
    let second = controller.active_view().unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();

    controller.close_view(&mut host, second).unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();

    let newest = controller.active_view().unwrap();
    assert_eq!(controller.active_document().unwrap().view_number(newest), Some(3));
    assert_eq!(host.labels(), vec!["Test", "Test:3", "Test:3"]);
}

/// Controller whose factory builds views for some other document
fn mismatched_controller() -> Controller {
    Controller::new(Box::new(|_| {
        let (view, _) = RecordingView::new(DocumentId::next());
        Box::new(view) as Box<dyn View>
    }))
}

#[test]
fn test_new_document_without_view_is_rolled_back() {
    let mut controller = mismatched_controller();
    let mut host = FakeHost::default();

    let err = controller
        .new_document(&mut host, &mut ScriptedPrompts::named("Test"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(controller.document_count(), 0);
    assert_eq!(host.container_count(), 0);
    assert!(controller.active_view().is_none());
}

#[test]
fn test_open_without_view_is_rolled_back() {
    let mut controller = mismatched_controller();
    let mut host = FakeHost::default();
    let file = signal_file(&format!("{}\n", REFERENCE_LINE));

    let err = controller.open_path(&mut host, file.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(controller.document_count(), 0);
    assert_eq!(host.container_count(), 0);
}

#[test]
fn test_save_leaves_document_and_views_untouched() {
    let (mut controller, log) = recording_controller();
    let mut host = FakeHost::default();
    let source = signal_file(&format!("{}\n", REFERENCE_LINE));
    controller.open_path(&mut host, source.path()).unwrap();
    let first = controller.active_view().unwrap();
    controller.create_view_for_active_document(&mut host).unwrap();
    let second = controller.active_view().unwrap();

    let before_samples = controller
        .active_document()
        .and_then(|doc| doc.as_signal())
        .unwrap()
        .samples()
        .to_vec();
    let before_refreshes = (refreshes_of(&log, first), refreshes_of(&log, second));

    let dir = tempfile::tempdir().unwrap();
    let mut prompts = ScriptedPrompts {
        save: Some(dir.path().join("copy.txt")),
        ..ScriptedPrompts::default()
    };
    controller.save_active_document(&mut prompts).unwrap();

    let after_samples = controller
        .active_document()
        .and_then(|doc| doc.as_signal())
        .unwrap()
        .samples();
    assert_eq!(after_samples, before_samples.as_slice());
    assert_eq!(
        (refreshes_of(&log, first), refreshes_of(&log, second)),
        before_refreshes
    );
}

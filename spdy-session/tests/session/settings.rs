//! SETTINGS handling: concurrency caps and initial-window plumbing.

use spdy_session::frame::{
    Settings, StreamStatus, SETTINGS_INITIAL_WINDOW_SIZE, SETTINGS_MAX_CONCURRENT_STREAMS,
};

use crate::support::*;

fn settings_max_streams(value: u32) -> Settings {
    let mut settings = Settings::new();
    settings.set(SETTINGS_MAX_CONCURRENT_STREAMS, value);
    settings
}

#[test]
fn concurrency_cap_refuses_excess_streams() {
    let mut session = server();

    session.send_frame(settings_max_streams(2).into()).unwrap();

    session.recv_frame(syn_stream(1).into());
    session.recv_frame(syn_stream(3).into());
    assert_eq!(session.active_streams(), 2);

    session.recv_frame(syn_stream(9).into());

    let down = downstream(&mut session);
    let rst = expect_rst(down.last().unwrap().clone());
    assert_eq!(rst.stream_id(), sid(9));
    assert_eq!(rst.status(), StreamStatus::REFUSED_STREAM);
    assert!(!session.is_active(sid(9)));
    assert_eq!(session.active_streams(), 2);
}

#[test]
fn effective_cap_is_the_minimum_of_both_sides() {
    let mut session = server();

    session.send_frame(settings_max_streams(5).into()).unwrap();
    session.recv_frame(settings_max_streams(3).into());

    for id in [1u32, 3, 5] {
        session.recv_frame(syn_stream(id).into());
    }
    assert_eq!(session.active_streams(), 3);

    session.recv_frame(syn_stream(7).into());
    assert_eq!(session.active_streams(), 3);
    let down = downstream(&mut session);
    assert_eq!(
        expect_rst(down.last().unwrap().clone()).status(),
        StreamStatus::REFUSED_STREAM
    );
}

#[test]
fn zero_means_unspecified() {
    let mut session = server();

    session.send_frame(settings_max_streams(0).into()).unwrap();
    session.recv_frame(settings_max_streams(2).into());

    // the remote value applies on its own
    session.recv_frame(syn_stream(1).into());
    session.recv_frame(syn_stream(3).into());
    session.recv_frame(syn_stream(5).into());
    assert_eq!(session.active_streams(), 2);
}

#[test]
fn inbound_initial_window_applies_to_the_send_side() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session.recv_frame(settings_initial_window(1_024).into());

    assert_eq!(session.send_window(sid(1)), Some(1_024));
    assert_eq!(session.recv_window(sid(1)), Some(65_536));

    // new streams start from the updated value
    session.recv_frame(syn_stream(3).into());
    assert_eq!(session.send_window(sid(3)), Some(1_024));
    assert_eq!(session.recv_window(sid(3)), Some(65_536));
}

#[test]
fn outbound_initial_window_applies_to_the_receive_side() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session.send_frame(settings_initial_window(1_024).into()).unwrap();

    assert_eq!(session.recv_window(sid(1)), Some(1_024));
    assert_eq!(session.send_window(sid(1)), Some(65_536));
}

#[test]
fn persisted_initial_window_value_is_discarded() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());

    let mut settings = settings_initial_window(1_024);
    settings.set_persisted(SETTINGS_INITIAL_WINDOW_SIZE, true);
    session.recv_frame(settings.into());

    // the persisted value never reached the windows
    assert_eq!(session.send_window(sid(1)), Some(65_536));

    // and it is gone from the frame the application sees
    let up = upstream(&mut session);
    let forwarded = expect_settings(up.last().unwrap().clone());
    assert_eq!(forwarded.get(SETTINGS_INITIAL_WINDOW_SIZE), None);
}

#[test]
fn persist_request_on_initial_window_is_stripped() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());

    let mut settings = settings_initial_window(1_024);
    settings.set_persist_value(SETTINGS_INITIAL_WINDOW_SIZE, true);
    session.recv_frame(settings.into());

    // the value itself still applies
    assert_eq!(session.send_window(sid(1)), Some(1_024));

    let up = upstream(&mut session);
    let forwarded = expect_settings(up.last().unwrap().clone());
    assert_eq!(forwarded.get(SETTINGS_INITIAL_WINDOW_SIZE), Some(1_024));
    assert!(!forwarded.is_persist_value(SETTINGS_INITIAL_WINDOW_SIZE));
}

#[test]
fn outbound_settings_are_scrubbed_the_same_way() {
    let mut session = server();

    let mut settings = settings_initial_window(2_048);
    settings.set_persist_value(SETTINGS_INITIAL_WINDOW_SIZE, true);
    session.send_frame(settings.into()).unwrap();

    let down = downstream(&mut session);
    let sent = expect_settings(down.last().unwrap().clone());
    assert_eq!(sent.get(SETTINGS_INITIAL_WINDOW_SIZE), Some(2_048));
    assert!(!sent.is_persist_value(SETTINGS_INITIAL_WINDOW_SIZE));
}

#[test]
fn settings_are_forwarded_upstream() {
    let mut session = server();

    session.recv_frame(settings_max_streams(8).into());

    let up = upstream(&mut session);
    assert_eq!(up.len(), 1);
    let forwarded = expect_settings(up[0].clone());
    assert_eq!(forwarded.get(SETTINGS_MAX_CONCURRENT_STREAMS), Some(8));
}

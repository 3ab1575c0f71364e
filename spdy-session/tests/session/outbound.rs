//! Outbound frame validation.

use spdy_session::frame::{
    Frame, GoAway, Headers, Ping, RstStream, SessionStatus, StreamStatus, SynReply, WindowUpdate,
};
use spdy_session::UserError;
use std::time::Instant;

use crate::support::*;

#[test]
fn response_flows_on_a_remote_stream() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session.send_frame(SynReply::new(sid(1)).into()).unwrap();
    session.send_frame(data(1, 100, false).into()).unwrap();

    let down = downstream(&mut session);
    assert_eq!(down.len(), 2);
    assert!(matches!(down[0], Frame::SynReply(_)));
    assert_eq!(expect_data(down[1].clone()).len(), 100);
    assert_eq!(session.send_window(sid(1)), Some(65_536 - 100));
}

#[test]
fn data_on_locally_closed_stream_is_rejected() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    let mut reply = SynReply::new(sid(1));
    reply.set_last(true);
    session.send_frame(reply.into()).unwrap();

    let err = session.send_frame(data(1, 10, false).into()).unwrap_err();
    assert_eq!(err, UserError::ClosedStream);

    // the rejected write emitted nothing
    assert_eq!(downstream(&mut session).len(), 1);
}

#[test]
fn data_on_unknown_stream_is_rejected() {
    let mut session = server();

    let err = session.send_frame(data(1, 10, false).into()).unwrap_err();
    assert_eq!(err, UserError::ClosedStream);
}

#[test]
fn last_data_closes_the_local_side() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session.send_frame(SynReply::new(sid(1)).into()).unwrap();
    session.send_frame(data(1, 10, true).into()).unwrap();

    let err = session
        .send_frame(Headers::new(sid(1)).into())
        .unwrap_err();
    assert_eq!(err, UserError::ClosedStream);
}

#[test]
fn local_syn_stream_opens_a_stream() {
    let mut session = client();

    session.send_frame(syn_stream(1).into()).unwrap();

    assert!(session.is_active(sid(1)));
    // locally-initiated ids never advance the last good id
    assert_eq!(session.last_good_stream_id(), sid(0));
    assert_eq!(downstream(&mut session).len(), 1);
}

#[test]
fn local_syn_stream_with_fin_closes_the_local_side() {
    let mut session = client();

    let mut frame = syn_stream(1);
    frame.set_last(true);
    session.send_frame(frame.into()).unwrap();

    let err = session.send_frame(data(1, 10, false).into()).unwrap_err();
    assert_eq!(err, UserError::ClosedStream);
}

#[test]
fn syn_stream_with_peer_parity_is_rejected() {
    let mut session = client();

    let err = session.send_frame(syn_stream(2).into()).unwrap_err();
    assert_eq!(err, UserError::InvalidStreamId);
    assert!(downstream(&mut session).is_empty());
}

#[test]
fn syn_stream_after_goaway_is_rejected() {
    let mut session = client();

    session.recv_frame(GoAway::new(sid(0), SessionStatus::OK).into());

    let err = session.send_frame(syn_stream(1).into()).unwrap_err();
    assert_eq!(err, UserError::Rejected);
}

#[test]
fn syn_reply_needs_a_remote_stream() {
    let mut session = server();

    // even id would be one of our own streams
    let err = session.send_frame(SynReply::new(sid(2)).into()).unwrap_err();
    assert_eq!(err, UserError::InvalidStreamId);
}

#[test]
fn outbound_rst_stream_removes_the_stream() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session
        .send_frame(RstStream::new(sid(1), StreamStatus::CANCEL).into())
        .unwrap();

    assert!(!session.is_active(sid(1)));
    let down = downstream(&mut session);
    assert_eq!(down.len(), 1);
    assert_eq!(expect_rst(down[0].clone()).status(), StreamStatus::CANCEL);
}

#[test]
fn goaway_and_window_update_writes_are_rejected() {
    let mut session = server();

    let err = session
        .send_frame(GoAway::new(sid(0), SessionStatus::OK).into())
        .unwrap_err();
    assert_eq!(err, UserError::UnexpectedFrameType);

    let err = session
        .send_frame(WindowUpdate::new(sid(1), 100).into())
        .unwrap_err();
    assert_eq!(err, UserError::UnexpectedFrameType);

    assert!(downstream(&mut session).is_empty());
    assert!(!session.sent_goaway());
}

#[test]
fn ping_with_peer_parity_is_rejected() {
    let mut session = server();

    // odd ping ids belong to the client
    let err = session.send_frame(Ping::new(3).into()).unwrap_err();
    assert_eq!(err, UserError::InvalidPingId);
    assert_eq!(session.outstanding_pings(), 0);
}

#[test]
fn headers_flow_until_the_local_side_closes() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    session.send_frame(SynReply::new(sid(1)).into()).unwrap();

    let mut trailers = Headers::new(sid(1));
    trailers.set_last(true);
    session.send_frame(trailers.into()).unwrap();

    let err = session.send_frame(Headers::new(sid(1)).into()).unwrap_err();
    assert_eq!(err, UserError::ClosedStream);

    let down = downstream(&mut session);
    assert_eq!(down.len(), 2);
    assert!(matches!(down[1], Frame::Headers(_)));
}

#[test]
fn rejected_writes_leave_the_session_usable() {
    let mut session = server();

    session.recv_frame(syn_stream(1).into());
    let _ = session.send_frame(SynReply::new(sid(3)).into());
    let _ = session.send_frame(GoAway::new(sid(0), SessionStatus::OK).into());

    // the earlier rejections did not tear anything down
    session.send_frame(SynReply::new(sid(1)).into()).unwrap();
    assert!(session.is_active(sid(1)));
    assert_eq!(session.poll_close(Instant::now()), spdy_session::CloseState::Open);
}

use super::*;

#[test]
fn requests_fire_in_order() {
    let mut h = HeadlessHost::new();
    let a = h.request_frame();
    let b = h.request_frame();
    assert_ne!(a, b);
    assert_eq!(h.take_due(), Some(a));
    assert_eq!(h.take_due(), Some(b));
    assert_eq!(h.take_due(), None);
    assert_eq!(h.requested(), 2);
}

#[test]
fn cancel_counts_only_outstanding_tokens() {
    let mut h = HeadlessHost::new();
    let a = h.request_frame();
    h.cancel_frame(a);
    h.cancel_frame(a);
    h.cancel_frame(FrameToken(99));
    assert!(h.pending().is_empty());
    assert_eq!(h.cancelled(), 1);
}

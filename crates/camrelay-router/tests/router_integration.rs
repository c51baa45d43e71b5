//! End-to-end routing tests.
//!
//! These tests drive the router the way a real deployment does: a fake
//! capability backend pushes raw wire records through an [`EventFeed`],
//! and subscribers consume typed per-camera streams on the other side.
//! The backend is substituted at construction time — the same wiring a
//! production application performs with the real backend.

use camrelay_router::{
    EventFeed, EventRouter, RecvError, RouterConfig, SessionState, TryRecvError,
};
use camrelay_types::CameraId;
use serde_json::json;

/// Test double for the native capability backend.
///
/// Reports events as wire records, exactly as the out-of-scope binding
/// layer would, so these tests also exercise the decode boundary.
struct FakeCameraBackend {
    feed: EventFeed,
}

impl FakeCameraBackend {
    fn new(router: &EventRouter) -> Self {
        Self {
            feed: router.feed(),
        }
    }

    fn report_resolution(&self, camera: u32, capture: (u32, u32), preview: (u32, u32)) {
        self.feed
            .submit(&json!({
                "cameraId": camera,
                "kind": "resolution_changed",
                "payload": {
                    "captureWidth": capture.0,
                    "captureHeight": capture.1,
                    "previewWidth": preview.0,
                    "previewHeight": preview.1,
                },
            }))
            .expect("well-formed resolution record");
    }

    fn report_error(&self, camera: u32, description: &str) {
        self.feed
            .submit(&json!({
                "cameraId": camera,
                "kind": "error",
                "payload": { "description": description },
            }))
            .expect("well-formed error record");
    }

    fn report_closing(&self, camera: u32) {
        self.feed
            .submit(&json!({ "cameraId": camera, "kind": "camera_closing" }))
            .expect("well-formed closing record");
    }
}

// === Filtering and ordering ===

#[tokio::test]
async fn error_subscriber_sees_matching_subsequence_in_order() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);
    let mut errors = router.subscribe_error(CameraId::new(1));

    // Interleave kinds and cameras; only camera 1's errors must surface.
    backend.report_error(1, "first");
    backend.report_resolution(1, (1920, 1080), (1280, 720));
    backend.report_error(2, "other camera");
    backend.report_error(1, "second");
    backend.report_closing(1);
    backend.report_error(1, "third");

    assert_eq!(errors.recv().await.unwrap().description, "first");
    assert_eq!(errors.recv().await.unwrap().description, "second");
    assert_eq!(errors.recv().await.unwrap().description, "third");
    assert_eq!(errors.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn cross_session_isolation() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);
    let mut closings = router.subscribe_closing(CameraId::new(2));

    backend.report_closing(1);
    backend.report_closing(2);

    // Exactly the camera-2 event, never the camera-1 event.
    assert_eq!(closings.recv().await.unwrap(), CameraId::new(2));
    assert_eq!(closings.try_recv(), Err(TryRecvError::Empty));
}

// === Resolution replay cache ===

#[tokio::test]
async fn late_resolution_subscriber_replays_latest_value() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    backend.report_resolution(1, (100, 100), (50, 50));
    backend.report_resolution(1, (200, 200), (100, 100));

    // Late subscriber: first observed value is the latest, not the first.
    let mut resolutions = router.subscribe_resolution_changed(CameraId::new(1));
    let first = resolutions.recv().await.unwrap();
    assert_eq!(
        (first.capture_width, first.capture_height),
        (200, 200)
    );
    assert_eq!(
        (first.preview_width, first.preview_height),
        (100, 100)
    );
    assert_eq!(resolutions.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn repeated_subscriptions_replay_the_same_cached_value() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    backend.report_resolution(1, (1920, 1080), (1280, 720));

    // No new events between subscriptions: every fresh subscriber sees
    // the identical cached value.
    for _ in 0..3 {
        let mut sub = router.subscribe_resolution_changed(CameraId::new(1));
        let replayed = sub.recv().await.unwrap();
        assert_eq!(replayed.capture_width, 1920);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }
}

#[tokio::test]
async fn replay_then_live_events_in_order() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    backend.report_resolution(1, (640, 480), (320, 240));
    let mut sub = router.subscribe_resolution_changed(CameraId::new(1));
    backend.report_resolution(1, (1920, 1080), (1280, 720));

    // Cached value first, then the live event.
    assert_eq!(sub.recv().await.unwrap().capture_width, 640);
    assert_eq!(sub.recv().await.unwrap().capture_width, 1920);
}

// === Subscriber independence ===

#[tokio::test]
async fn multi_subscriber_independence() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    let mut first = router.subscribe_closing(CameraId::new(1));
    let mut second = router.subscribe_closing(CameraId::new(1));

    backend.report_closing(1);

    // Each subscriber receives the event exactly once.
    assert_eq!(first.recv().await.unwrap(), CameraId::new(1));
    assert_eq!(second.recv().await.unwrap(), CameraId::new(1));
    assert_eq!(first.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(second.try_recv(), Err(TryRecvError::Empty));

    // Unsubscribing one does not affect delivery to the other.
    drop(first);
    backend.report_closing(1);
    assert_eq!(second.recv().await.unwrap(), CameraId::new(1));
}

#[tokio::test]
async fn subscribers_share_one_cache_per_camera() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    let mut early = router.subscribe_resolution_changed(CameraId::new(1));
    backend.report_resolution(1, (1920, 1080), (1280, 720));
    assert_eq!(early.recv().await.unwrap().capture_width, 1920);

    // A subscriber created afterwards replays from the same cache the
    // early subscriber's delivery updated.
    let mut late = router.subscribe_resolution_changed(CameraId::new(1));
    assert_eq!(late.recv().await.unwrap().capture_width, 1920);
}

// === Unknown cameras ===

#[tokio::test]
async fn subscription_to_unknown_camera_emits_nothing() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);

    // Subscription itself is non-blocking and succeeds.
    let mut errors = router.subscribe_error(CameraId::new(99));

    backend.report_error(1, "unrelated");

    assert_eq!(errors.try_recv(), Err(TryRecvError::Empty));
    // The subscription lazily activated the session.
    assert_eq!(router.session_state(CameraId::new(99)), SessionState::Active);
}

// === Session retirement ===

#[tokio::test]
async fn retirement_ends_streams_and_discards_late_events() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);
    let cam = CameraId::new(1);

    let mut errors = router.subscribe_error(cam);
    backend.report_error(1, "before retirement");
    router.retire_session(cam).expect("active session retires");

    // Events already enqueued drain; then the stream ends.
    assert_eq!(errors.recv().await.unwrap().description, "before retirement");
    assert_eq!(errors.recv().await, Err(RecvError::Closed));

    // A late event from the backend is discarded, not routed.
    assert_eq!(backend.feed.dispatch(camrelay_router::CameraEvent::error(cam, "late")), 0);
    assert_eq!(router.session_state(cam), SessionState::Retired);

    // The id cannot be resurrected by a new subscription.
    let mut resurrected = router.subscribe_error(cam);
    assert_eq!(resurrected.try_recv(), Err(TryRecvError::Closed));
}

#[tokio::test]
async fn retirement_drops_the_resolution_cache() {
    let router = EventRouter::default();
    let backend = FakeCameraBackend::new(&router);
    let cam = CameraId::new(1);

    backend.report_resolution(1, (1920, 1080), (1280, 720));
    router.retire_session(cam).expect("active session retires");

    let mut sub = router.subscribe_resolution_changed(cam);
    assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
}

// === Inbound contract violations ===

#[tokio::test]
async fn malformed_records_fail_loudly_and_route_nothing() {
    let router = EventRouter::default();
    let feed = router.feed();
    let mut errors = router.subscribe_error(CameraId::new(1));

    let unknown_kind = feed.submit(&json!({ "cameraId": 1, "kind": "focus_changed" }));
    assert!(unknown_kind.is_err());

    let missing_payload = feed.submit(&json!({ "cameraId": 1, "kind": "error" }));
    assert!(missing_payload.is_err());

    let zero_dimension = feed.submit(&json!({
        "cameraId": 1,
        "kind": "resolution_changed",
        "payload": {
            "captureWidth": 0, "captureHeight": 1080,
            "previewWidth": 1280, "previewHeight": 720,
        },
    }));
    assert!(zero_dimension.is_err());

    assert_eq!(errors.try_recv(), Err(TryRecvError::Empty));
}

// === Capacity / lag ===

#[tokio::test]
async fn slow_subscriber_lags_alone() {
    let router = EventRouter::new(RouterConfig::default().with_event_capacity(2));
    let backend = FakeCameraBackend::new(&router);

    let mut slow = router.subscribe_error(CameraId::new(1));
    for i in 0..5 {
        backend.report_error(1, &format!("error {i}"));
    }

    // The slow subscriber skipped the overflowed events...
    assert_eq!(slow.recv().await, Err(RecvError::Lagged(3)));
    // ...and resumes from the oldest retained one.
    assert_eq!(slow.recv().await.unwrap().description, "error 3");
    assert_eq!(slow.recv().await.unwrap().description, "error 4");

    // A fresh subscriber is unaffected by the other's lag.
    let mut fresh = router.subscribe_error(CameraId::new(1));
    backend.report_error(1, "after");
    assert_eq!(fresh.recv().await.unwrap().description, "after");
}

//! Property-based tests for replay ordering and timestamp stability

use proptest::prelude::*;
use std::sync::Arc;
use telemetry_facade::{
    DeferredCall, Event, ManualClock, Method, ReadinessGate, RecordingEngine, Session,
    TelemetryFacade,
};

#[derive(Debug, Clone)]
enum Op {
    Histogram(String, i32),
    Keyed(String, String, i32),
    StartSession(String),
    StopSession(String),
    UiEvent(String),
    Advance(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let name = "[a-z]{1,8}";
    prop_oneof![
        (name, any::<i32>()).prop_map(|(n, v)| Op::Histogram(n, v)),
        (name, name, any::<i32>()).prop_map(|(n, k, v)| Op::Keyed(n, k, v)),
        name.prop_map(Op::StartSession),
        name.prop_map(Op::StopSession),
        name.prop_map(Op::UiEvent),
        any::<u16>().prop_map(Op::Advance),
    ]
}

/// Apply `op` to the facade and return the call it should produce, if any.
fn apply(facade: &TelemetryFacade, clock: &ManualClock, op: &Op) -> Option<DeferredCall> {
    let now = facade.realtime();
    match op {
        Op::Histogram(name, value) => {
            facade.add_to_histogram(name, *value);
            Some(DeferredCall::AddHistogram {
                name: name.clone(),
                value: *value,
            })
        }
        Op::Keyed(name, key, value) => {
            facade.add_to_keyed_histogram(name, key, *value);
            Some(DeferredCall::AddKeyedHistogram {
                name: name.clone(),
                key: key.clone(),
                value: *value,
            })
        }
        Op::StartSession(name) => {
            facade.start_ui_session(&Session::new(name.clone()), None);
            Some(DeferredCall::StartUiSession {
                name: name.clone(),
                timestamp: now,
            })
        }
        Op::StopSession(name) => {
            facade.stop_ui_session(&Session::new(name.clone()), Some("s"));
            Some(DeferredCall::StopUiSession {
                name: format!("{}:s", name),
                reason: String::new(),
                timestamp: now,
            })
        }
        Op::UiEvent(name) => {
            facade.send_ui_event(&Event::new(name.clone()), &Method::from_static("list"));
            Some(DeferredCall::AddUiEvent {
                event: name.clone(),
                method: "list".to_string(),
                timestamp: now,
                extras: None,
            })
        }
        Op::Advance(millis) => {
            clock.advance(i64::from(*millis));
            None
        }
    }
}

/// Whatever mix of calls happens before and after the ready signal, the engine
/// sees each exactly once, in issue order, with call-time timestamps.
#[test]
fn test_replay_matches_issue_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(op_strategy(), 0..40), 0usize..=40),
            |(ops, split)| {
                let engine = Arc::new(RecordingEngine::new());
                let clock = Arc::new(ManualClock::new(0, 1_000));
                let facade = TelemetryFacade::new(
                    engine.clone(),
                    clock.clone(),
                    Arc::new(ReadinessGate::new()),
                );

                let split = split.min(ops.len());
                let mut expected = Vec::new();
                for op in &ops[..split] {
                    expected.extend(apply(&facade, &clock, op));
                }
                prop_assert!(engine.is_empty());
                prop_assert_eq!(facade.pending_calls(), expected.len());

                clock.advance(10_000);
                prop_assert_eq!(facade.mark_engine_ready(), expected.len());

                for op in &ops[split..] {
                    expected.extend(apply(&facade, &clock, op));
                }

                prop_assert_eq!(facade.pending_calls(), 0);
                prop_assert_eq!(engine.calls(), expected);
                Ok(())
            },
        )
        .unwrap();
}

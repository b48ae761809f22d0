use std::sync::Arc;
use std::thread;

use telemetry_facade::{DeferredCall, StopOutcome, TimerAnomaly};

use crate::integration::test_utils::harness;

#[test]
fn timer_stopped_before_ready_is_replayed() {
    let h = harness();
    let timer = h.facade.uptime_timer("startup");
    h.clock.advance(320);

    assert_eq!(timer.stop(), StopOutcome::Recorded(320));
    assert!(h.engine.is_empty());

    h.facade.mark_engine_ready();
    assert_eq!(
        h.engine.calls(),
        vec![DeferredCall::AddHistogram {
            name: "startup".to_string(),
            value: 320,
        }]
    );
}

#[test]
fn stop_then_cancel_keeps_the_sample() {
    let h = harness();
    h.facade.mark_engine_ready();
    let timer = h.facade.realtime_timer("page");
    h.clock.advance(40);

    assert_eq!(timer.stop(), StopOutcome::Recorded(40));
    timer.cancel();
    assert_eq!(timer.elapsed(), Some(40));
    assert_eq!(h.engine.len(), 1);
}

#[test]
fn concurrent_stops_record_exactly_one_sample() {
    let h = harness();
    h.facade.mark_engine_ready();
    let timer = Arc::new(h.facade.uptime_timer("race"));
    h.clock.advance(75);

    let outcomes: Vec<StopOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let timer = Arc::clone(&timer);
                scope.spawn(move || timer.stop())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let recorded = outcomes
        .iter()
        .filter(|o| matches!(o, StopOutcome::Recorded(75)))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(h.engine.len(), 1);
    assert_eq!(timer.elapsed(), Some(75));
}

#[test]
fn inverted_clock_reports_anomaly_and_stays_empty() {
    let h = harness();
    h.facade.mark_engine_ready();
    let timer = h.facade.uptime_timer("skew");
    h.clock.advance(-10);

    match timer.stop() {
        StopOutcome::Anomaly(TimerAnomaly::ClockInversion { name, .. }) => {
            assert_eq!(name, "skew")
        }
        other => panic!("expected clock inversion, got {:?}", other),
    }
    assert_eq!(timer.elapsed(), None);
    assert!(h.engine.is_empty());
}

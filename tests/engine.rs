#[cfg(test)]
mod tests {
    use keytime::libs::config::EngineConfig;
    use keytime::libs::engine::Engine;
    use keytime::libs::metrics::{self, Snapshot};
    use keytime::libs::state::{Status, TrackerState};

    const TOLERANCE: f64 = 1e-9;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), 0.0).unwrap()
    }

    fn assert_status_accounting(snapshot: &Snapshot) {
        let sum = snapshot.total_active_seconds + snapshot.total_inactive_seconds;
        assert!(
            (sum - snapshot.elapsed_seconds).abs() < 1e-6,
            "active {} + inactive {} != elapsed {}",
            snapshot.total_active_seconds,
            snapshot.total_inactive_seconds,
            snapshot.elapsed_seconds
        );
    }

    #[test]
    fn test_scenario_walkthrough() {
        let engine = engine();

        // 1. First key event activates without accrual
        engine.record_key_event(0.0, "A");
        let snap = engine.snapshot(0.0);
        assert_eq!(snap.status, Status::Active);
        assert_eq!(snap.total_typing_seconds, 0.0);
        assert!(snap.top_windows.is_empty());

        // 2. Gap of 2s accrues to typing and the ledger
        engine.record_key_event(2.0, "A");
        let snap = engine.snapshot(2.0);
        assert!((snap.total_typing_seconds - 2.0).abs() < TOLERANCE);
        assert_eq!(snap.top_windows, vec![("A".to_string(), 2.0)]);

        // 3. Gap of 7s is excluded but still advances the last event
        engine.record_key_event(9.0, "A");
        let snap = engine.snapshot(9.0);
        assert!((snap.total_typing_seconds - 2.0).abs() < TOLERANCE);
        assert_eq!(snap.top_windows, vec![("A".to_string(), 2.0)]);
        assert_eq!(engine.read(|s| s.last_event_timestamp()), Some(9.0));

        // 4. Monitor tick 5s after the last event closes the active interval
        assert!(!engine.force_inactive_if_silent(13.0));
        assert!(engine.force_inactive_if_silent(14.0));
        let snap = engine.snapshot(14.0);
        assert_eq!(snap.status, Status::Inactive);
        assert!((engine.read(|s| s.total_active_seconds()) - 14.0).abs() < TOLERANCE);
        assert_status_accounting(&snap);
    }

    #[test]
    fn test_ledger_capacity_scenario() {
        let engine = engine();
        engine.record_key_event(0.0, "START");
        // The activating event accrues nothing, so WINDOW0..WINDOW99 fill the ledger
        for i in 0..101 {
            engine.record_key_event(0.5 + i as f64 * 0.5, &format!("WINDOW{}", i));
        }

        let (len, last) = engine.read(|s| (s.ledger().len(), s.ledger().get("WINDOW100")));
        assert_eq!(len, 100);
        assert_eq!(last, None);
    }

    #[test]
    fn test_ledger_never_exceeds_capacity_for_any_order() {
        let config = EngineConfig {
            ledger_capacity: 7,
            ..Default::default()
        };
        let engine = Engine::new(config, 0.0).unwrap();
        engine.record_key_event(0.0, "W0");
        for i in 1..200u64 {
            // Scrambled label order with repeats
            let label = format!("W{}", (i * 37) % 23);
            engine.record_key_event(i as f64 * 0.1, &label);
            assert!(engine.read(|s| s.ledger().len()) <= 7);
        }
    }

    #[test]
    fn test_click_release_changes_only_label() {
        let engine = engine();
        engine.record_click_event(1.0, "BROWSER", false);
        let snap = engine.snapshot(1.0);
        assert_eq!(snap.total_clicks, 0);
        assert_eq!(snap.status, Status::Inactive);
        assert_eq!(snap.current_window_label, "BROWSER");
        assert_eq!(snap.total_typing_seconds, 0.0);
    }

    #[test]
    fn test_total_clicks_counts_presses_only() {
        let engine = engine();
        let presses = [true, false, true, true, false, false, true];
        for (i, pressed) in presses.iter().enumerate() {
            engine.record_click_event(i as f64, "A", *pressed);
        }
        let expected = presses.iter().filter(|p| **p).count() as u64;
        assert_eq!(engine.snapshot(10.0).total_clicks, expected);
    }

    #[test]
    fn test_gap_accrual_matches_threshold_rule() {
        for gap in [0.5, 1.0, 4.999, 5.0, 5.001, 12.0] {
            let engine = engine();
            engine.record_key_event(10.0, "A");
            engine.record_key_event(10.0 + gap, "A");

            let (typing, ledger) = engine.read(|s| (s.total_typing_seconds(), s.ledger().get("A")));
            if gap < 5.0 {
                assert!((typing - gap).abs() < TOLERANCE, "gap {}", gap);
                assert!((ledger.unwrap() - gap).abs() < TOLERANCE, "gap {}", gap);
            } else {
                assert_eq!(typing, 0.0, "gap {}", gap);
                assert_eq!(ledger, None, "gap {}", gap);
            }
            assert_eq!(engine.read(|s| s.last_event_timestamp()), Some(10.0 + gap));
        }
    }

    #[test]
    fn test_status_accounting_holds_at_every_query() {
        let engine = engine();
        let script: [(f64, &str); 8] = [
            (1.0, "key"),
            (2.0, "key"),
            (3.0, "tick"),
            (8.0, "tick"),
            (9.5, "click"),
            (10.0, "key"),
            (16.0, "tick"),
            (30.0, "key"),
        ];
        for (t, action) in script {
            match action {
                "key" => {
                    engine.record_key_event(t, "A");
                }
                "click" => {
                    engine.record_click_event(t, "A", true);
                }
                _ => {
                    engine.force_inactive_if_silent(t);
                }
            }
            for offset in [0.0, 0.25, 3.0] {
                assert_status_accounting(&engine.snapshot(t + offset));
            }
        }
    }

    #[test]
    fn test_typing_and_active_time_are_distinct() {
        let engine = engine();
        engine.record_key_event(0.0, "A");
        engine.record_key_event(1.0, "A");
        engine.record_key_event(4.0, "A");
        engine.force_inactive_if_silent(9.0);

        let snap = engine.snapshot(9.0);
        assert!((snap.total_typing_seconds - 4.0).abs() < TOLERANCE);
        assert!((snap.total_active_seconds - 9.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_metrics_zero_and_non_negative() {
        let state = TrackerState::new(50.0, 5.0, 100);
        assert_eq!(metrics::efficiency_percent(&state, 50.0), 0.0);
        assert_eq!(metrics::keys_per_minute(&state, 50.0), 0.0);
        assert_eq!(metrics::clicks_per_minute(&state, 50.0), 0.0);

        let engine = Engine::new(EngineConfig::default(), 50.0).unwrap();
        engine.record_key_event(51.0, "A");
        engine.record_click_event(52.0, "A", true);
        for now in [40.0, 50.0, 51.0, 60.0, 600.0] {
            let snap = engine.snapshot(now);
            assert!(snap.efficiency_percent >= 0.0);
            assert!(snap.keys_per_minute >= 0.0);
            assert!(snap.clicks_per_minute >= 0.0);
        }
    }

    #[test]
    fn test_histogram_only_counts_keys() {
        let engine = engine();
        engine.record_key_event(61.0, "A");
        engine.record_key_event(121.4, "A");
        engine.record_click_event(1.0, "A", true);

        let histogram = engine.snapshot(130.0).histogram;
        assert_eq!(histogram.buckets[1], 2);
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.max, 2);
    }
}

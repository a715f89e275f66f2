use hifitime::{Duration, Epoch};
use tofo::scheduler::transit_scheduler::TransitScheduler;
use tofo::scheduler::{build_nodes, EnumerationMode};
use tofo::targets::event_window::EventWindowModel;
use tofo::targets::{Target, Visibility};
use tofo::time::{epoch_from_jd_tdb, period_from_days, ObservationBracket};

mod common;
use common::{at, coord, site, FakeOracle};

fn night() -> ObservationBracket {
    ObservationBracket::from_bounds(at(20, 0), at(23, 0)).unwrap()
}

#[test]
fn fixed_target_is_centred_in_the_bracket() {
    let oracle = FakeOracle::default();
    let site = site(900.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut target = Target::new("RR Lyr")
        .with_coord(coord(291.37, 42.78))
        .with_bracket(night());
    model.recompute_occurrences(&mut target).unwrap();

    let occurrences = target.occurrences(Visibility::Full);
    assert_eq!(occurrences.len(), 1);
    let times = occurrences[0].times();
    assert_eq!(times.mid, at(21, 30));
    assert!(times.is_strictly_increasing());
    assert_eq!(oracle.occurrence_calls(), 0);
}

#[test]
fn periodic_occurrence_count_and_bounds() {
    let oracle = FakeOracle::default();
    let site = site(600.0);
    let model = EventWindowModel::new(&oracle, &site);
    let bracket =
        ObservationBracket::new(at(18, 0), Duration::from_seconds(10.0 * 3600.0)).unwrap();
    let l = bracket.duration().to_seconds();

    for (period_s, offset_s) in [
        (3_600.0, 0.0),
        (5_000.0, 1_234.5),
        (7_777.0, 99.0),
        (36_000.0, 10.0),
    ] {
        let mut target = Target::new("EB")
            .with_coord(coord(100.0, -10.0))
            .with_event(
                at(0, 0) + Duration::from_seconds(offset_s),
                Duration::from_seconds(period_s),
            )
            .with_duration(Duration::from_seconds(1_200.0))
            .with_bracket(bracket);
        model.recompute_occurrences(&mut target).unwrap();

        let occurrences = target.occurrences(Visibility::Partial);
        let expected = (l / period_s).floor() as i64;
        let got = occurrences.len() as i64;
        assert!(
            (got - expected).abs() <= 1,
            "period {period_s}: {got} occurrences, expected about {expected}"
        );
        assert!(occurrences.iter().all(|o| bracket.contains(o.times().mid)));
        assert!(occurrences
            .windows(2)
            .all(|w| w[0].times().mid < w[1].times().mid));
        assert!(occurrences.iter().all(|o| o.times().is_strictly_increasing()));
    }
    assert_eq!(oracle.observable_calls(), 4);
}

#[test]
fn partial_list_is_a_superset_of_full_list() {
    let oracle = FakeOracle::default().with_blackout(at(21, 0), at(21, 10));
    let site = site(600.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut target = Target::new("W UMa")
        .with_coord(coord(143.0, 55.9))
        .with_event(at(19, 0), Duration::from_seconds(1_800.0))
        .with_duration(Duration::from_seconds(600.0))
        .with_bracket(night());
    model.recompute_occurrences(&mut target).unwrap();

    let full = target.occurrences(Visibility::Full);
    let partial = target.occurrences(Visibility::Partial);
    assert!(full.len() < partial.len());
    assert!(full.iter().all(|f| partial.contains(f)));
    assert!(partial.iter().all(|p| p.is_partially_observable()));
}

#[test]
fn recompute_is_idempotent() {
    let oracle = FakeOracle {
        light_travel: Duration::from_seconds(250.0),
        ..FakeOracle::default()
    };
    let site = site(1_800.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut target = Target::new("WASP-12 b")
        .with_position("06 30 32.79", "+29 40 20.3")
        .unwrap()
        .with_event(epoch_from_jd_tdb(2_457_010.512_72), period_from_days(1.091_419_1))
        .with_duration(Duration::from_seconds(3.0 * 3600.0))
        .with_bracket(
            ObservationBracket::new(at(18, 0), Duration::from_seconds(3.0 * 86_400.0)).unwrap(),
        );
    model.recompute_occurrences(&mut target).unwrap();
    let first = target.clone();
    model.recompute_occurrences(&mut target).unwrap();
    assert_eq!(first, target);
    assert!(target.has_events(Visibility::Partial));

    let details = target.event_details(Visibility::Partial).unwrap();
    assert_eq!(
        details.corrected_times().mid,
        details.times().mid + Duration::from_seconds(250.0)
    );
}

#[test]
fn nodes_follow_the_occurrences() {
    let oracle = FakeOracle::default();
    let site = site(600.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut targets = vec![
        Target::new("late")
            .with_coord(coord(10.0, 10.0))
            .with_priority(2.0)
            .with_bracket(ObservationBracket::from_bounds(at(22, 0), at(23, 0)).unwrap()),
        Target::new("early")
            .with_coord(coord(20.0, 10.0))
            .with_bracket(ObservationBracket::from_bounds(at(20, 0), at(21, 0)).unwrap()),
    ];
    assert!(model.recompute_all(&mut targets).iter().all(Result::is_ok));

    let nodes = build_nodes(&targets, Visibility::Full).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].target_id(), "early");
    assert_eq!(nodes[1].target_id(), "late");
    assert_eq!(nodes[1].weight(), 2.0);

    let times = *targets[0].occurrences(Visibility::Full)[0].times();
    assert_eq!(nodes[1].start_time(), times.window_start);
    assert_eq!(nodes[1].end_time(), times.window_end);

    // nodes own their timing
    targets.clear();
    assert_eq!(nodes[0].occurrence_index(), 0);
}

#[test]
fn scheduler_runs_end_to_end() {
    let oracle = FakeOracle::default();
    let site = site(300.0);

    let targets = vec![
        Target::new("V1").with_coord(coord(10.0, 10.0)).with_bracket(
            ObservationBracket::from_bounds(at(20, 0), at(20, 40)).unwrap(),
        ),
        Target::new("V2").with_coord(coord(12.0, 10.0)).with_bracket(
            ObservationBracket::from_bounds(at(20, 40), at(21, 20)).unwrap(),
        ),
        Target::new("V3").with_coord(coord(14.0, 10.0)),
        Target::new("unresolved"),
        Target::new("broken")
            .with_coord(coord(1.0, 1.0))
            .with_event(at(19, 0), Duration::ZERO),
    ];
    // V3 falls back to the session bracket [21:20, 22:40], centred at 22:00
    let session = ObservationBracket::from_bounds(at(21, 20), at(22, 40)).unwrap();

    let scheduler = TransitScheduler::new(&oracle, &site).with_max_nodes(100);
    let report = scheduler.run(targets, session).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0.name(), "broken");
    assert_eq!(report.targets.len(), 4);
    assert_eq!(report.nodes.len(), 3);

    let best = report.best_sequences(1);
    assert_eq!(best[0].target_ids(), vec!["V1", "V2", "V3"]);

    let maximal = TransitScheduler::new(&oracle, &site)
        .with_mode(EnumerationMode::MaximalOnly)
        .run(report.targets.clone(), session)
        .unwrap();
    // V1-V2-V3, V1-V3 and V2-V3 cannot be extended
    assert_eq!(maximal.sequences.len(), 3);
}

#[test]
fn non_periodic_target_with_default_duration() {
    let oracle = FakeOracle::default();
    let site = site(60.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut target = Target::new("X").with_coord(coord(0.0, 0.0));
    target.set_bracket(Some(night()), &model).unwrap();
    let times = *target.occurrences(Visibility::Full)[0].times();
    assert_eq!(times.egress - times.ingress, Duration::from_seconds(60.0));
    assert_eq!(times.window_start, Epoch::from_gregorian_utc_hms(2024, 8, 12, 21, 28, 30));
}

#[test]
fn timing_builders_drop_cached_occurrences() {
    let oracle = FakeOracle::default();
    let site = site(600.0);
    let model = EventWindowModel::new(&oracle, &site);

    let mut target = Target::new("V1")
        .with_coord(coord(10.0, 10.0))
        .with_bracket(ObservationBracket::from_bounds(at(20, 0), at(22, 0)).unwrap());
    model.recompute_occurrences(&mut target).unwrap();
    assert!(target.has_events(Visibility::Partial));

    let early = ObservationBracket::from_bounds(at(1, 0), at(3, 0)).unwrap();
    let mut target = target
        .with_bracket(early)
        .with_duration(Duration::from_seconds(3_600.0));
    assert!(!target.has_events(Visibility::Full));
    assert!(!target.has_events(Visibility::Partial));
    assert!(build_nodes(std::slice::from_ref(&target), Visibility::Partial)
        .unwrap()
        .is_empty());

    model.recompute_occurrences(&mut target).unwrap();
    let times = *target.occurrences(Visibility::Full)[0].times();
    assert!(early.contains(times.mid));
    assert_eq!(times.mid, at(2, 0));
    assert_eq!(times.egress - times.ingress, Duration::from_seconds(3_600.0));

    for changed in [
        target.clone().with_coord(coord(20.0, 10.0)),
        target.clone().with_event(at(1, 30), Duration::from_seconds(1_800.0)),
    ] {
        assert!(!changed.has_events(Visibility::Partial));
    }
}

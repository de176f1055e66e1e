//! Inventory case: the 52-week loop, rationing, validation, and aliasing.

use casesim_core::case::SimulationCase;
use casesim_core::error::SimError;
use casesim_core::inventory::{ration_replenishment, InventoryCase, NUM_WEEKS};
use std::collections::BTreeMap;

fn two_location_case(seed: u64) -> InventoryCase {
    InventoryCase::new(
        vec!["1".into(), "2".into()],
        vec![(100, 500), (100, 500)],
        None,
        seed,
    )
    .unwrap()
}

#[test]
fn scenario_b_two_locations_full_year() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut case = two_location_case(42);
    let result = case.run(1).unwrap();

    assert_eq!(
        result.detail().len(),
        2 * NUM_WEEKS,
        "expected one row per location-week"
    );

    let summary = result.summary();
    assert!(summary["perf_metric"].is_finite());
    assert_eq!(
        summary["total_fixed_cost"],
        2.0 * NUM_WEEKS as f64 * 24_000.0
    );
    assert!(summary["total_revenue"] >= 0.0);
    assert!(summary["total_shortage_amount"] >= 0.0);
    assert!(summary["total_holding_cost"] >= 0.0);
    assert!(
        (0.0..=100.0).contains(&result.score()),
        "score out of range: {}",
        result.score()
    );
}

#[test]
fn detail_rows_never_show_negative_inventory() {
    let mut case = InventoryCase::new(
        vec!["3".into(), "4".into(), "6".into()],
        vec![(200, 900), (50, 300), (400, 1500)],
        None,
        7,
    )
    .unwrap();
    let output = case.simulate().unwrap();

    for record in &output.weekly {
        assert!(
            record.post_inventory >= 0,
            "negative inventory at {} week {}",
            record.location,
            record.week
        );
        assert!(record.supply <= record.demand);
        assert!(record.supply <= record.prior_inventory);
        assert_eq!(record.prior_inventory - record.supply, record.post_inventory);
        assert_eq!(record.shortage_count, record.demand - record.supply);
        assert_eq!(record.holding_cost, record.post_inventory as f64 * 10.0);
    }
}

#[test]
fn rationing_leaves_small_requests_untouched() {
    let desired = vec![1_000, 2_000, 0, 500];
    assert_eq!(ration_replenishment(&desired, 7_000), desired);
}

#[test]
fn rationing_conserves_capacity_exactly_under_contention() {
    let cases: [(&[i64], i64); 4] = [
        (&[5_000, 5_000, 5_000], 7_000),
        (&[6_000, 1_234, 777, 3_333], 7_000),
        (&[7_001], 7_000),
        (&[1, 1, 1, 6_999, 6_999, 6_999], 7_000),
    ];
    for (desired, capacity) in cases {
        let allocation = ration_replenishment(desired, capacity);
        assert_eq!(
            allocation.iter().sum::<i64>(),
            capacity,
            "allocation for {desired:?} does not sum to capacity"
        );
        for (&got, &want) in allocation.iter().zip(desired) {
            assert!(got >= 0);
            assert!(
                got <= want,
                "location allocated {got} but only asked for {want}"
            );
        }
    }
}

#[test]
fn invalid_configurations_are_rejected() {
    // No locations.
    assert!(matches!(
        InventoryCase::new(vec![], vec![], None, 1),
        Err(SimError::InvalidConfiguration(_))
    ));
    // Mismatched policy count.
    assert!(matches!(
        InventoryCase::new(vec!["1".into(), "2".into()], vec![(100, 500)], None, 1),
        Err(SimError::InvalidConfiguration(_))
    ));
    // S must exceed s.
    assert!(matches!(
        InventoryCase::new(vec!["1".into()], vec![(500, 500)], None, 1),
        Err(SimError::InvalidConfiguration(_))
    ));
    // Negative reorder point.
    assert!(matches!(
        InventoryCase::new(vec!["1".into()], vec![(-1, 500)], None, 1),
        Err(SimError::InvalidConfiguration(_))
    ));
    // Unknown location.
    assert!(matches!(
        InventoryCase::new(vec!["7".into()], vec![(100, 500)], None, 1),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn partial_alias_map_is_rejected() {
    let mut aliases = BTreeMap::new();
    aliases.insert("north".to_string(), "1".to_string());
    aliases.insert("south".to_string(), "2".to_string());
    let result = InventoryCase::new(
        vec!["north".into()],
        vec![(100, 500)],
        Some(aliases),
        1,
    );
    assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
}

#[test]
fn alias_map_with_duplicate_targets_is_rejected() {
    // Six distinct aliases, but "1" is targeted twice and "6" never.
    let mut aliases = BTreeMap::new();
    for (alias, canonical) in ["a", "b", "c", "d", "e", "f"]
        .iter()
        .zip(["1", "1", "2", "3", "4", "5"])
    {
        aliases.insert(alias.to_string(), canonical.to_string());
    }
    let result = InventoryCase::new(vec!["a".into()], vec![(100, 500)], Some(aliases), 1);
    assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
}

#[test]
fn alias_map_resolves_names_and_keeps_them_in_detail_rows() {
    let names = ["north", "south", "east", "west", "hub", "depot"];
    let mut aliases = BTreeMap::new();
    for (alias, canonical) in names.iter().zip(["1", "2", "3", "4", "5", "6"]) {
        aliases.insert(alias.to_string(), canonical.to_string());
    }

    let mut aliased = InventoryCase::new(
        vec!["north".into(), "south".into()],
        vec![(100, 500), (100, 500)],
        Some(aliases),
        42,
    )
    .unwrap();
    let mut canonical = two_location_case(42);

    let aliased_out = aliased.simulate().unwrap();
    let canonical_out = canonical.simulate().unwrap();

    // Same seed, same canonical locations: identical numbers, renamed rows.
    assert_eq!(aliased_out.perf_metric, canonical_out.perf_metric);
    assert!(aliased_out.weekly.iter().all(|r| r.location == "north"
        || r.location == "south"));
}

#[test]
fn same_seed_reproduces_the_year() {
    let out_a = two_location_case(99).simulate().unwrap();
    let out_b = two_location_case(99).simulate().unwrap();

    assert_eq!(out_a.perf_metric, out_b.perf_metric);
    assert_eq!(out_a.total_revenue, out_b.total_revenue);
    assert_eq!(out_a.total_shortage_count, out_b.total_shortage_count);
}

#[test]
fn different_seeds_diverge() {
    let out_a = two_location_case(1).simulate().unwrap();
    let out_b = two_location_case(2).simulate().unwrap();
    assert_ne!(out_a.perf_metric, out_b.perf_metric);
}

#[test]
fn report_bytes_carry_the_location_major_detail() {
    let mut case = two_location_case(5);
    let result = case.run(1).unwrap();

    let text = String::from_utf8(result.detail_as_bytes()).unwrap();
    let mut sections = text.split("\n\n");
    let aggregate = sections.next().unwrap();
    let detail = sections.next().unwrap();

    assert!(aggregate.contains("perf_metric"));
    let lines: Vec<&str> = detail.trim_end().lines().collect();
    assert_eq!(lines.len(), 1 + 2 * NUM_WEEKS);
    assert!(lines[0].starts_with("location,week"));
    // Location-major: all of location 1's year before location 2's.
    assert!(lines[1].starts_with("1,1,"));
    assert!(lines[NUM_WEEKS].starts_with(&format!("1,{NUM_WEEKS},")));
    assert!(lines[NUM_WEEKS + 1].starts_with("2,1,"));
}

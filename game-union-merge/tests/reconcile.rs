use std::collections::HashSet;

use game_union_core::*;
use game_union_merge::*;

fn game(title: &str, date: &str) -> GameRecord {
    let mut r = GameRecord::new(title, EntityKind::Game);
    r.release_date = ReleaseDate::parse(date);
    r
}

fn with_devs(mut r: GameRecord, devs: &[&str]) -> GameRecord {
    r.developers = devs.iter().map(|d| d.to_string()).collect();
    r
}

fn run(primary: Vec<GameRecord>, secondary: Vec<GameRecord>) -> ReconcileResult {
    reconcile(primary, secondary, ReconcileOptions::default()).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn same_title_same_year_merges_without_conflict() {
    let result = run(vec![game("Halo", "2007-09-25")], vec![game("Halo", "2007-09-25")]);

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.merged_exact, 1);
    assert!(result.audit.is_empty());
}

#[test]
fn same_title_decades_apart_stays_separate() {
    let result = run(vec![game("Halo", "1995-01-01")], vec![game("Halo", "2021-01-01")]);

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.merged_exact, 0);
    assert_eq!(result.stats.conflicts, 1);
    assert_eq!(result.audit.summary().conflicts, 1);
    match &result.audit.entries()[0] {
        AuditEntry::Rejected { reason, .. } => assert_eq!(*reason, Mismatch::YearGap(26)),
        other => panic!("unexpected entry {other:?}"),
    }
}

#[test]
fn fuzzy_pass_merges_contained_title_with_shared_developer() {
    let a = with_devs(game("Foo Bar", "2010-05-01"), &["Acme"]);
    let b = with_devs(game("Foo", "2011-02-01"), &["Acme Studios"]);
    let result = run(vec![a], vec![b]);

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.merged_fuzzy, 1);
    assert_eq!(result.match_states, vec![MatchState::MergedFuzzy]);
    assert_eq!(result.records[0].title, "Foo Bar");
    assert_eq!(result.records[0].developers, vec!["Acme", "Acme Studios"]);
    assert_eq!(result.audit.summary().fuzzy_merges, 1);
}

#[test]
fn duplicate_store_keeps_base_listing() {
    let mut a = game("Hades", "2020-09-17");
    a.stores = vec![StoreListing::new("Steam", "1145360")];
    let mut b = game("Hades", "2020-09-17");
    b.stores = vec![StoreListing::new("Steam", "hades-rawg-42")];

    let result = run(vec![a], vec![b]);
    let steam: Vec<_> = result.records[0]
        .stores
        .iter()
        .filter(|s| s.store.eq_ignore_ascii_case("steam"))
        .collect();
    assert_eq!(steam.len(), 1);
    assert_eq!(steam[0].external_id, "1145360");
}

// ── Degraded inputs ─────────────────────────────────────────────────────────

#[test]
fn missing_secondary_passes_primary_through() {
    let primary = vec![game("Halo", "2001-11-15"), game("Myst", "1993-09-24")];
    let result = Reconciler::new(ReconcileOptions::default())
        .run(
            Some(primary.clone().into_iter().map(Ok::<_, String>)),
            None::<Vec<Result<GameRecord, String>>>,
        )
        .unwrap();

    assert_eq!(result.records, primary);
    assert_eq!(result.stats.primary_only, 2);
    assert_eq!(result.stats.total_secondary, 0);
}

#[test]
fn missing_primary_passes_secondary_through() {
    let secondary = vec![game("Halo", "2001-11-15"), game("", "")];
    let result = Reconciler::new(ReconcileOptions::default())
        .run(
            None::<Vec<Result<GameRecord, String>>>,
            Some(secondary.clone().into_iter().map(Ok::<_, String>)),
        )
        .unwrap();

    assert_eq!(result.records, secondary);
    assert_eq!(result.stats.secondary_only, 2);
}

#[test]
fn empty_titles_never_merge() {
    let result = run(vec![game("", "2001-01-01")], vec![game("", "2001-01-01")]);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.merged_exact + result.stats.merged_fuzzy, 0);
}

#[test]
fn unknown_year_merges_on_exact_title() {
    let result = run(vec![game("Hollow Knight", "TBA")], vec![game("Hollow Knight", "2017-02-24")]);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].release_date.to_string(), "2017-02-24");
}

#[test]
fn secondary_listing_same_game_twice_yields_one_record() {
    let result = run(
        vec![game("Halo", "2001-11-15")],
        vec![game("Halo", "2001-11-15"), game("HALO", "2001-11-15")],
    );

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.merged_exact, 2);
    assert_eq!(result.stats.secondary_only, 0);
    assert!(result.audit.is_empty());
}

#[test]
fn repeated_key_is_validated_against_merged_record() {
    let result = run(
        vec![game("Halo", "TBA")],
        vec![game("Halo", "2001-11-15"), game("Halo", "2021-01-01")],
    );

    // The first merge gives the slot a concrete 2001 date, so the 2021
    // record is now 20 years off and stays separate.
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.merged_exact, 1);
    assert_eq!(result.stats.conflicts, 1);
    assert_eq!(result.records[0].release_date.to_string(), "2001-11-15");
    assert_eq!(result.records[1].release_date.to_string(), "2021-01-01");
}

// ── Duplicate keys in the primary catalog ───────────────────────────────────

#[test]
fn duplicate_primary_keys_drop_by_default() {
    let result = run(
        vec![game("Prey", "2017-05-05"), game("PREY", "2006-07-11")],
        vec![],
    );
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.total_primary, 2);
    assert_eq!(result.stats.duplicates_dropped, 1);
    assert_eq!(result.audit.summary().duplicates, 1);
}

#[test]
fn duplicate_primary_keys_can_be_kept() {
    let options = ReconcileOptions {
        duplicates: DuplicatePolicy::Keep,
        ..ReconcileOptions::default()
    };
    let result = reconcile(
        vec![game("Prey", "2017-05-05"), game("PREY", "2006-07-11")],
        vec![game("Prey", "2006-07-11")],
        options,
    )
    .unwrap();

    // The second Prey is never matchable; B collides with the first one
    // (11 years apart), so nothing merges.
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.stats.duplicates_dropped, 0);
    assert_eq!(result.stats.conflicts, 1);
    assert_eq!(result.records[1].title, "PREY");
}

#[test]
fn kept_duplicates_stay_in_primary_input_order() {
    let options = ReconcileOptions {
        duplicates: DuplicatePolicy::Keep,
        ..ReconcileOptions::default()
    };
    let result = reconcile(
        vec![
            game("Prey", "2017-05-05"),
            game("PREY", "2006-07-11"),
            game("Doom", "1993-12-10"),
        ],
        vec![game("Braid", "2008-08-06")],
        options,
    )
    .unwrap();

    let titles: Vec<_> = result.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Prey", "PREY", "Doom", "Braid"]);
}

// ── Properties over a mixed catalog ─────────────────────────────────────────

fn mixed_catalogs() -> (Vec<GameRecord>, Vec<GameRecord>) {
    let mut halo_a = game("Halo", "2001-11-15");
    halo_a.primary_image = "https://img/halo.jpg".into();
    halo_a.gallery = vec!["https://img/halo.jpg".into(), "https://img/h1.jpg".into()];
    halo_a.platforms = vec!["PC".into()];
    halo_a.stores = vec![StoreListing::new("Steam", "1")];

    let mut halo_b = game("HALO", "2003-09-30");
    halo_b.gallery = vec!["https://img/H1.jpg".into(), "https://img/halo.jpg".into()];
    halo_b.platforms = vec!["pc".into(), "Xbox".into()];
    halo_b.stores = vec![StoreListing::new("steam", "x"), StoreListing::new("Xbox Store", "y")];

    let mut dlc_a = game("Halo Soundtrack", "2001-11-15");
    dlc_a.kind = EntityKind::Dlc;
    let dlc_b = game("Halo Soundtrack", "2001-11-15");

    let primary = vec![
        halo_a,
        dlc_a,
        game("Doom", "1993-12-10"),
        with_devs(game("Portal 2", "2011-04-19"), &["Valve"]),
        with_devs(game("The Witness", "2016-01-26"), &["Thekla, Inc."]),
        game("", "2000-01-01"),
        game("Celeste", "TBA"),
    ];
    let secondary = vec![
        halo_b,
        dlc_b,
        game("DOOM", "2016-05-13"),
        with_devs(game("Portal 2: Complete", "2012-01-01"), &["Valve Corporation"]),
        with_devs(game("Witness", "2018-01-01"), &["Thekla"]),
        game("Celeste", "2018-01-25"),
        game("Braid", "2008-08-06"),
    ];
    (primary, secondary)
}

#[test]
fn output_count_is_primary_plus_unmatched_secondary() {
    let (primary, secondary) = mixed_catalogs();
    let total_primary = primary.len();
    let result = run(primary, secondary);

    assert_eq!(result.stats.total_primary, total_primary);
    assert_eq!(result.records.len(), total_primary + result.stats.secondary_only);
    assert_eq!(result.stats.emitted, result.records.len());
    assert_eq!(
        result.stats.total_secondary,
        result.stats.merged_exact + result.stats.merged_fuzzy + result.stats.secondary_only
    );
    assert_eq!(
        result.stats.primary_only,
        total_primary - result.stats.merged_exact - result.stats.merged_fuzzy
    );
}

#[test]
fn mixed_catalog_merges_expected_pairs() {
    let (primary, secondary) = mixed_catalogs();
    let result = run(primary, secondary);

    // Halo (2 years apart), Celeste (TBA) exact; Portal 2 fuzzy.
    // Halo Soundtrack is a kind mismatch, DOOM is 23 years off, Witness is
    // 2 years off for the fuzzy window.
    assert_eq!(result.stats.merged_exact, 2);
    assert_eq!(result.stats.merged_fuzzy, 1);
    assert_eq!(result.stats.conflicts, 2);
    assert_eq!(result.stats.secondary_only, 4);

    let unmatched: Vec<_> = result.records[7..].iter().map(|r| r.title.as_str()).collect();
    assert_eq!(unmatched, vec!["Halo Soundtrack", "DOOM", "Witness", "Braid"]);
}

#[test]
fn merged_records_satisfy_field_invariants() {
    let (primary, secondary) = mixed_catalogs();
    let result = run(primary, secondary);

    for record in &result.records {
        if !record.primary_image.is_empty() {
            assert!(!record.gallery.contains(&record.primary_image));
        }
        for list in [&record.platforms, &record.genres, &record.gallery, &record.developers] {
            let mut seen = HashSet::new();
            for item in list {
                assert!(seen.insert(item.to_lowercase()), "case duplicate {item:?}");
            }
        }
        let mut stores = HashSet::new();
        for s in &record.stores {
            assert!(stores.insert(s.store.to_lowercase()));
        }
    }

    let halo = &result.records[0];
    assert_eq!(halo.platforms, vec!["PC", "Xbox"]);
    assert_eq!(halo.gallery, vec!["https://img/h1.jpg"]);
    assert_eq!(halo.release_date.to_string(), "2001-11-15");
    let stores: Vec<_> = halo.stores.iter().map(|s| s.store.as_str()).collect();
    assert_eq!(stores, vec!["Steam", "Xbox Store"]);
}

#[test]
fn every_merge_pairs_records_of_the_same_kind() {
    let (primary, secondary) = mixed_catalogs();
    let policy = MatchPolicy::default();
    let result = run(primary.clone(), secondary.clone());

    for (a, state) in primary.iter().zip(&result.match_states) {
        let partner = secondary.iter().find(|b| match state {
            MatchState::MergedExact => b.title_key() == a.title_key(),
            MatchState::MergedFuzzy => is_fuzzy_match(&policy, a, b),
            MatchState::Unmatched => false,
        });
        match (state, partner) {
            (MatchState::Unmatched, _) => {}
            (MatchState::MergedExact, Some(b)) => {
                assert_eq!(a.kind, b.kind);
                assert!(same_entity(&policy, a, b).is_same());
            }
            (MatchState::MergedFuzzy, Some(b)) => assert_eq!(a.kind, b.kind),
            (_, None) => panic!("merged slot {:?} has no partner", a.title),
        }
    }
}

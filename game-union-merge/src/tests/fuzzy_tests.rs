use super::*;
use game_union_core::ReleaseDate;

fn game(title: &str, date: &str, devs: &[&str]) -> GameRecord {
    let mut r = GameRecord::new(title, EntityKind::Game);
    r.release_date = ReleaseDate::parse(date);
    r.developers = devs.iter().map(|d| d.to_string()).collect();
    r
}

fn matcher_over(records: Vec<GameRecord>) -> (PrimaryIndex, FuzzyMatcher) {
    let index = PrimaryIndex::build(records);
    let matcher = FuzzyMatcher::new(&MatchPolicy::default(), &index, index.indexed_slots());
    (index, matcher)
}

#[test]
fn matches_on_containment_developer_and_year() {
    let (index, mut matcher) =
        matcher_over(vec![game("Foo Bar", "2010-03-01", &["Acme"])]);
    let orphan = game("Foo", "2011-01-01", &["Acme Studios"]);

    let slot = matcher.find(&orphan).unwrap();
    assert_eq!(index.record(slot).title, "Foo Bar");
    assert_eq!(matcher.remaining(), 0);
}

#[test]
fn year_window_is_one_year() {
    let (_, mut matcher) = matcher_over(vec![game("Foo Bar", "2010-03-01", &["Acme"])]);
    assert_eq!(matcher.find(&game("Foo", "2012-01-01", &["Acme"])), None);
    assert!(matcher.find(&game("Foo", "TBA", &["Acme"])).is_some());
}

#[test]
fn requires_developer_overlap() {
    let (_, mut matcher) = matcher_over(vec![game("Foo Bar", "2010-03-01", &["Acme"])]);
    assert_eq!(matcher.find(&game("Foo", "2010-01-01", &["Globex"])), None);
    assert_eq!(matcher.find(&game("Foo", "2010-01-01", &[])), None);
}

#[test]
fn requires_title_containment() {
    let (_, mut matcher) = matcher_over(vec![game("Foo Bar", "2010-03-01", &["Acme"])]);
    assert_eq!(matcher.find(&game("Baz", "2010-01-01", &["Acme"])), None);
    assert!(matcher.find(&game("Foo Bar: Deluxe", "2010-01-01", &["Acme"])).is_some());
}

#[test]
fn requires_same_kind() {
    let (_, mut matcher) = matcher_over(vec![game("Foo Bar", "2010-03-01", &["Acme"])]);
    let mut dlc = game("Foo", "2010-01-01", &["Acme"]);
    dlc.kind = EntityKind::Dlc;
    assert_eq!(matcher.find(&dlc), None);
}

#[test]
fn first_candidate_in_index_order_wins_and_is_consumed() {
    let (index, mut matcher) = matcher_over(vec![
        game("Foo Bar", "2010-01-01", &["Acme"]),
        game("Foo Baz", "2010-01-01", &["Acme"]),
    ]);

    let first = matcher.find(&game("Foo", "2010-01-01", &["Acme"])).unwrap();
    assert_eq!(index.record(first).title, "Foo Bar");

    let second = matcher.find(&game("Foo", "2010-01-01", &["Acme"])).unwrap();
    assert_eq!(index.record(second).title, "Foo Baz");

    assert_eq!(matcher.find(&game("Foo", "2010-01-01", &["Acme"])), None);
}

#[test]
fn only_listed_slots_are_candidates() {
    let index = PrimaryIndex::build(vec![
        game("Foo Bar", "2010-01-01", &["Acme"]),
        game("Foo Baz", "2010-01-01", &["Acme"]),
    ]);
    let mut matcher = FuzzyMatcher::new(&MatchPolicy::default(), &index, [1]);
    assert_eq!(matcher.find(&game("Foo", "2010-01-01", &["Acme"])), Some(1));
}

#[test]
fn pairwise_check_agrees_with_matcher() {
    let policy = MatchPolicy::default();
    let a = game("Foo Bar", "2010-03-01", &["Acme"]);
    assert!(is_fuzzy_match(&policy, &a, &game("Foo", "2011-01-01", &["Acme Studios"])));
    assert!(!is_fuzzy_match(&policy, &a, &game("Foo", "2012-01-01", &["Acme Studios"])));
    assert!(!is_fuzzy_match(&policy, &a, &game("", "2010-01-01", &["Acme"])));
}

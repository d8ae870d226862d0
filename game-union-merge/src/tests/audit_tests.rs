use super::*;
use game_union_core::{EntityKind, ReleaseDate};

fn summary(title: &str, date: &str) -> RecordSummary {
    let mut r = GameRecord::new(title, EntityKind::Game);
    r.release_date = ReleaseDate::parse(date);
    RecordSummary::from(&r)
}

#[test]
fn entries_render_both_sides() {
    let entry = AuditEntry::Rejected {
        primary: summary("Halo", "1995-01-01"),
        secondary: summary("Halo", "2021-06-01"),
        reason: Mismatch::YearGap(26),
    };
    assert_eq!(
        entry.to_string(),
        "[CONFLICT] release years 26 apart: A=\"Halo\" (game, 1995-01-01) | B=\"Halo\" (game, 2021-06-01)"
    );

    let entry = AuditEntry::FuzzyMerge {
        primary: summary("Foo Bar", "2010-01-01"),
        secondary: summary("Foo", ""),
    };
    assert_eq!(
        entry.to_string(),
        "[FUZZY MERGE] A=\"Foo Bar\" (game, 2010-01-01) | B=\"Foo\" (game, no date)"
    );
}

#[test]
fn report_has_header_and_one_line_per_entry() {
    let mut log = AuditLog::new("global_games.json");
    log.add(AuditEntry::FuzzyMerge {
        primary: summary("Foo Bar", "2010-01-01"),
        secondary: summary("Foo", "2011-01-01"),
    });
    log.add(AuditEntry::DuplicateKey {
        kept: summary("Prey", "2017-05-05"),
        duplicate: summary("PREY", "2006-07-11"),
        emitted: false,
    });

    let mut buf = Vec::new();
    log.write_to(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "=== Reconciliation Report: global_games.json ===");
    assert!(lines[1].starts_with("Date: "));
    assert_eq!(lines[2], "Conflicts: 0 | Fuzzy merges: 1 | Duplicate keys: 1");
    assert_eq!(lines.len(), 6);
    assert!(lines[4].starts_with("[FUZZY MERGE]"));
    assert!(lines[5].starts_with("[DUPLICATE]"));
    assert!(lines[5].contains("dropped"));
}

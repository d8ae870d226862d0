use super::*;

#[test]
fn parses_iso_dates() {
    let date = ReleaseDate::parse("2007-11-23");
    assert_eq!(date, ReleaseDate::Known(NaiveDate::from_ymd_opt(2007, 11, 23).unwrap()));
    assert_eq!(date.year(), Some(2007));
    assert_eq!(date.to_string(), "2007-11-23");
}

#[test]
fn placeholders_have_no_year() {
    assert_eq!(ReleaseDate::parse("TBA"), ReleaseDate::Tba);
    assert_eq!(ReleaseDate::parse("tba"), ReleaseDate::Tba);
    assert_eq!(ReleaseDate::parse(""), ReleaseDate::Unknown);
    assert_eq!(ReleaseDate::parse("   "), ReleaseDate::Unknown);
    assert_eq!(ReleaseDate::Tba.year(), None);
    assert_eq!(ReleaseDate::Unknown.year(), None);
    assert!(!ReleaseDate::Tba.is_concrete());
}

#[test]
fn raw_dates_keep_text_and_leading_year() {
    let date = ReleaseDate::parse("2019-13-45");
    assert_eq!(date, ReleaseDate::Raw("2019-13-45".to_string()));
    assert_eq!(date.year(), Some(2019));
    assert!(date.is_concrete());

    assert_eq!(ReleaseDate::parse("2021").year(), Some(2021));
    assert_eq!(ReleaseDate::parse("Q3 2024").year(), None);
    assert_eq!(ReleaseDate::parse("20").year(), None);
    assert_eq!(ReleaseDate::parse("Coming soon").to_string(), "Coming soon");
}

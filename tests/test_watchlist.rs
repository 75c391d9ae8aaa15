//! Watchlist store integration tests.

mod common;

use common::{date, read_file, setup, write_file, FakeSource, WATCHLIST_HEADER_LINE};
use pricewatch::{PriceWatchError, WatchlistEntry};

fn fresh() -> (pricewatch::PriceWatch<FakeSource>, tempfile::TempDir) {
    setup(FakeSource::new(date(5, 3, 2024)))
}

// ---------------------------------------------------------------------------
// ensure_initialized
// ---------------------------------------------------------------------------

#[test]
fn ensure_initialized_writes_header() {
    let (pw, _tmp) = fresh();

    pw.watchlist().ensure_initialized().unwrap();
    assert_eq!(read_file(&pw.config().watchlist_path), WATCHLIST_HEADER_LINE);
    assert!(pw.watchlist().list_entries().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// add_entry / list_entries
// ---------------------------------------------------------------------------

#[test]
fn add_entry_appends_in_order() {
    let (pw, _tmp) = fresh();
    let wl = pw.watchlist();
    wl.ensure_initialized().unwrap();

    wl.add_entry("Widget", "http://x/1").unwrap();
    wl.add_entry("Gadget", "http://x/2").unwrap();

    assert_eq!(
        wl.list_entries().unwrap(),
        vec![
            WatchlistEntry::new("Widget", "http://x/1"),
            WatchlistEntry::new("Gadget", "http://x/2"),
        ]
    );
    assert_eq!(
        read_file(&pw.config().watchlist_path),
        "name;url\nWidget;http://x/1\nGadget;http://x/2\n"
    );
}

#[test]
fn add_entry_creates_missing_file_with_header() {
    let (pw, _tmp) = fresh();

    pw.watchlist().add_entry("Widget", "http://x/1").unwrap();
    assert_eq!(
        read_file(&pw.config().watchlist_path),
        "name;url\nWidget;http://x/1\n"
    );
}

#[test]
fn add_entry_trims_and_rejects_blank_fields() {
    let (pw, _tmp) = fresh();
    let wl = pw.watchlist();

    let entry = wl.add_entry("  Widget ", " http://x/1").unwrap();
    assert_eq!(entry, WatchlistEntry::new("Widget", "http://x/1"));

    let err = wl.add_entry("Gadget", "   ").unwrap_err();
    assert!(matches!(err, PriceWatchError::InvalidArgument(_)));
    assert_eq!(wl.list_entries().unwrap().len(), 1);
}

#[test]
fn add_entry_to_unwritable_path_is_io_error() {
    let (pw, tmp) = fresh();
    // A directory where the file should be makes the open fail.
    std::fs::create_dir(tmp.path().join("url.csv")).unwrap();

    let err = pw.watchlist().add_entry("Widget", "http://x/1").unwrap_err();
    assert!(matches!(err, PriceWatchError::Io(_)));
}

#[test]
fn add_entry_after_hand_edited_file_without_trailing_newline() {
    let (pw, _tmp) = fresh();
    write_file(&pw.config().watchlist_path, "name;url\nWidget;http://x/1");

    pw.watchlist().add_entry("Gadget", "http://x/2").unwrap();

    assert_eq!(
        pw.watchlist().list_entries().unwrap(),
        vec![
            WatchlistEntry::new("Widget", "http://x/1"),
            WatchlistEntry::new("Gadget", "http://x/2"),
        ]
    );
    assert_eq!(
        read_file(&pw.config().watchlist_path),
        "name;url\nWidget;http://x/1\nGadget;http://x/2\n"
    );
}

#[test]
fn list_entries_missing_file_is_file_missing() {
    let (pw, _tmp) = fresh();

    let err = pw.watchlist().list_entries().unwrap_err();
    assert!(matches!(err, PriceWatchError::FileMissing(_)));
    assert!(err.is_not_found());
}

#[test]
fn list_entries_reads_externally_edited_file() {
    let (pw, _tmp) = fresh();
    write_file(
        &pw.config().watchlist_path,
        ";name;url\r\n0;Widget;http://x/1\r\n2;Gadget;http://x/2\r\n",
    );

    let names: Vec<String> = pw
        .watchlist()
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Widget", "Gadget"]);
}

// ---------------------------------------------------------------------------
// list_product_names
// ---------------------------------------------------------------------------

#[test]
fn list_product_names_collapses_duplicates() {
    let (pw, _tmp) = fresh();
    let wl = pw.watchlist();
    wl.add_entry("Widget", "http://x/1").unwrap();
    wl.add_entry("Gadget", "http://x/2").unwrap();
    wl.add_entry("Widget", "http://x/3").unwrap();

    let names = wl.list_product_names().unwrap();
    assert_eq!(names.len(), 2);
    assert!(names.contains("Widget"));
    assert!(names.contains("Gadget"));
}

#[test]
fn list_product_names_missing_file_is_file_missing() {
    let (pw, _tmp) = fresh();

    let err = pw.watchlist().list_product_names().unwrap_err();
    assert!(matches!(err, PriceWatchError::FileMissing(_)));
}

// ---------------------------------------------------------------------------
// replace_entries
// ---------------------------------------------------------------------------

#[test]
fn replace_entries_rewrites_whole_file() {
    let (pw, _tmp) = fresh();
    let wl = pw.watchlist();
    wl.add_entry("Widget", "http://x/1").unwrap();
    wl.add_entry("Gadget", "http://x/2").unwrap();

    let mut entries = wl.list_entries().unwrap();
    entries.retain(|e| e.name != "Widget");
    wl.replace_entries(&entries).unwrap();

    assert_eq!(
        read_file(&pw.config().watchlist_path),
        "name;url\nGadget;http://x/2\n"
    );
}

#[test]
fn replace_entries_rejects_blank_rows_without_writing() {
    let (pw, _tmp) = fresh();
    let wl = pw.watchlist();
    wl.add_entry("Widget", "http://x/1").unwrap();

    let err = wl
        .replace_entries(&[WatchlistEntry::new("", "http://x/9")])
        .unwrap_err();
    assert!(matches!(err, PriceWatchError::InvalidArgument(_)));
    assert_eq!(wl.list_entries().unwrap().len(), 1);
}

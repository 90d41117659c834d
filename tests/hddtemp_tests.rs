// hddtemp protocol decoding and client tests

mod common;

use deskstat::error::TelemetryError;
use deskstat::hddtemp_repo::HddTempRepo;
use deskstat::hddtemp_repo::protocol::parse_response;
use deskstat::units::Scale;
use std::time::{Duration, Instant};

fn repo(port: u16) -> HddTempRepo {
    HddTempRepo::new(
        "127.0.0.1",
        port,
        Duration::from_millis(500),
        Duration::from_millis(500),
    )
}

#[test]
fn test_parses_two_records() {
    let parsed = parse_response("|/dev/sda|MODEL-X|42|C||/dev/sdb|MODEL-Y|38|C|").unwrap();
    assert!(parsed.skipped.is_empty());
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].device, "/dev/sda");
    assert_eq!(parsed.records[0].model, "MODEL-X");
    assert_eq!(parsed.records[0].temperature, 42.0);
    assert_eq!(parsed.records[0].scale, Scale::Celsius);
    assert_eq!(parsed.records[1].device, "/dev/sdb");
    assert_eq!(parsed.records[1].temperature, 38.0);
}

#[test]
fn test_single_record_with_trailing_newline() {
    let parsed = parse_response("|/dev/sda|WDC WD10EZEX|35|C|\n").unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].model, "WDC WD10EZEX");
}

#[test]
fn test_empty_response_is_empty_list() {
    let parsed = parse_response("").unwrap();
    assert!(parsed.records.is_empty());
    assert!(parsed.skipped.is_empty());
}

#[test]
fn test_token_count_not_multiple_of_four_is_protocol_error() {
    let err = parse_response("|/dev/sda|MODEL-X|42|").unwrap_err();
    assert!(matches!(err, TelemetryError::Protocol(_)));

    let err = parse_response("|/dev/sda|MODEL-X|42|C||/dev/sdb|MODEL-Y|").unwrap_err();
    assert!(matches!(err, TelemetryError::Protocol(_)));
}

#[test]
fn test_bad_temperature_skips_only_that_record() {
    let parsed =
        parse_response("|/dev/sda|MODEL-X|abc|C||/dev/sdb|MODEL-Y|38|C||/dev/sdc|Z|40|C|").unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].device, "/dev/sdb");
    assert_eq!(parsed.records[1].device, "/dev/sdc");
    assert_eq!(parsed.skipped.len(), 1);
    assert!(matches!(parsed.skipped[0], TelemetryError::Protocol(_)));
}

#[test]
fn test_sleeping_drive_is_skipped() {
    let parsed = parse_response("|/dev/sda|MODEL-X|SLP|*||/dev/sdb|MODEL-Y|100|F|").unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].scale, Scale::Fahrenheit);
    assert_eq!(parsed.skipped.len(), 1);
}

#[tokio::test]
async fn test_fetch_reads_full_response() {
    let port = common::spawn_legacy_daemon("|/dev/sda|MODEL-X|42|C|").await;
    let raw = repo(port).fetch().await.unwrap();
    assert_eq!(raw, "|/dev/sda|MODEL-X|42|C|");
}

#[tokio::test]
async fn test_records_from_daemon() {
    let port = common::spawn_legacy_daemon("|/dev/sda|MODEL-X|42|C||/dev/sdb|MODEL-Y|38|C|").await;
    let records = repo(port).records().await;
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_unreachable_service() {
    let port = common::closed_port().await;
    let r = repo(port);
    let err = r.fetch().await.unwrap_err();
    assert!(matches!(err, TelemetryError::ServiceUnreachable { .. }));
    assert!(r.records().await.is_empty());
}

#[tokio::test]
async fn test_malformed_response_yields_no_records() {
    let port = common::spawn_legacy_daemon("|/dev/sda|MODEL-X|").await;
    assert!(repo(port).records().await.is_empty());
}

#[tokio::test]
async fn test_silent_daemon_times_out_as_unreachable() {
    let port = common::spawn_silent_daemon().await;
    let read_timeout = Duration::from_millis(200);
    let r = HddTempRepo::new("127.0.0.1", port, Duration::from_millis(500), read_timeout);

    let started = Instant::now();
    let err = r.fetch().await.unwrap_err();
    let elapsed = started.elapsed();
    assert!(
        matches!(&err, TelemetryError::ServiceUnreachable { reason, .. } if reason.contains("timed out")),
        "{err}"
    );
    assert!(elapsed >= read_timeout);
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

    assert!(r.records().await.is_empty());
}

#[tokio::test]
async fn test_connect_to_unroutable_host_gives_up_within_timeout() {
    // TEST-NET-1 is never routed; depending on the host this times out or fails fast
    let connect_timeout = Duration::from_millis(200);
    let r = HddTempRepo::new("192.0.2.1", 7634, connect_timeout, Duration::from_millis(200));

    let started = Instant::now();
    let err = r.fetch().await.unwrap_err();
    assert!(matches!(err, TelemetryError::ServiceUnreachable { .. }), "{err}");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(r.records().await.is_empty());
}

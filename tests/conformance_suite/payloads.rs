//! Link and extent validation against a recorded collections response.

use ogcapi_conformance::extent::parse_spatial_extent;
use ogcapi_conformance::links::{
    find_link_by_rel, find_links_by_rel_and_media_types, link_includes_rel_and_type,
    links_without_rel_or_type, media_type, rel,
};
use ogcapi_conformance::temporal::{format_date, parse_temporal_extent};
use serde_json::Value;

use crate::common::load_fixture;

fn collections_links() -> Vec<Value> {
    load_fixture("collections.json")["links"]
        .as_array()
        .expect("links must be an array")
        .clone()
}

#[test]
fn spatial_extent_round_trips_through_query_parameter() {
    let document = load_fixture("collections.json");
    let collection = &document["collections"][0];

    let bbox = parse_spatial_extent(collection).unwrap().unwrap();
    let rendered = bbox.as_query_parameter();
    let parts: Vec<f64> = rendered
        .split(',')
        .map(|p| p.parse().expect("bbox token must be numeric"))
        .collect();

    assert_eq!(parts.len(), 4);
    assert!((parts[0] - 5.61272621360749).abs() < 1e-5);
    assert!((parts[1] - 50.2373512077239).abs() < 1e-5);
    assert!((parts[2] - 9.58963433710139).abs() < 1e-5);
    assert!((parts[3] - 52.5286304537795).abs() < 1e-5);
}

#[test]
fn temporal_extent_parses_begin_and_end() {
    let document = load_fixture("collections.json");
    let extent = parse_temporal_extent(&document["collections"][0])
        .unwrap()
        .unwrap();

    assert_eq!(format_date(&extent.begin.unwrap()), "2017-01-01T00:00:00Z");
    assert_eq!(format_date(&extent.end.unwrap()), "2018-02-12T23:20:50Z");
}

#[test]
fn collection_without_extent_yields_absent() {
    let document = load_fixture("collections.json");
    let collection = &document["collections"][1];

    assert!(parse_spatial_extent(collection).unwrap().is_none());
    assert!(parse_temporal_extent(collection).unwrap().is_none());
}

#[test]
fn finds_link_to_itself() {
    let links = collections_links();
    let link_to_itself = find_link_by_rel(&links, rel::SELF).expect("self link must exist");

    assert_eq!(
        link_to_itself["href"].as_str().unwrap(),
        "http://www.ldproxy.nrw.de/rest/services/kataster/collections/?f=json"
    );
    assert_eq!(link_to_itself["rel"].as_str().unwrap(), "self");
    assert_eq!(link_to_itself["type"].as_str().unwrap(), "application/json");
    assert_eq!(link_to_itself["title"].as_str().unwrap(), "this document");
}

#[test]
fn self_link_is_complete() {
    let links = collections_links();
    let link_to_itself = find_link_by_rel(&links, rel::SELF).expect("self link must exist");
    assert!(link_includes_rel_and_type(link_to_itself));
}

#[test]
fn all_links_carry_rel_and_type() {
    assert!(links_without_rel_or_type(&collections_links()).is_empty());
}

#[test]
fn finds_alternate_links_by_media_type() {
    let links = collections_links();
    let alternates = find_links_by_rel_and_media_types(
        &links,
        &[media_type::HTML, media_type::JSON],
        rel::ALTERNATE,
    );
    assert_eq!(alternates.len(), 1);
    assert_eq!(alternates[0]["type"].as_str().unwrap(), "text/html");
}

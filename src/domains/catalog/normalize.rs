//! Response normalization.
//!
//! Maps raw, weakly-typed Discogs payloads into the fixed output records.
//! Every field is read defensively: a missing or oddly-typed value turns into
//! a default, never into an error. Elements of a batch that cannot be read at
//! all are dropped and counted.

use serde_json::{Map, Value};
use tracing::warn;

use super::model::{
    EntityRef, MarketplaceStats, RawRelease, RawTrack, ReleaseDetail, SearchResponse,
    SearchResult, TrackInfo, TrackRecord,
};

/// Maximum number of search hits returned to the caller.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Fallback `type` for search hits that carry none.
const UNKNOWN_TYPE: &str = "unknown";

// ============================================================================
// Search
// ============================================================================

/// Normalize raw search items, keeping at most [`MAX_SEARCH_RESULTS`] hits.
///
/// Iteration stops as soon as the cap is reached, so items past it are
/// never inspected.
pub fn search_response<I>(query: &str, items: I) -> SearchResponse
where
    I: IntoIterator<Item = Value>,
{
    let mut results = Vec::with_capacity(MAX_SEARCH_RESULTS);
    let mut skipped = 0;

    for item in items {
        if results.len() >= MAX_SEARCH_RESULTS {
            break;
        }

        match search_result(&item) {
            Some(result) => results.push(result),
            None => {
                warn!("Skipping search result that is not an object: {}", item);
                skipped += 1;
            }
        }
    }

    SearchResponse::new(query, results, skipped)
}

/// Normalize a single search item. Returns `None` for non-object items.
pub fn search_result(item: &Value) -> Option<SearchResult> {
    let data = item.as_object()?;

    let result_type = data
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_TYPE)
        .to_string();

    let title = match data.get("title") {
        Some(Value::String(title)) => title.clone(),
        Some(Value::Null) | None => item.to_string(),
        Some(other) => other.to_string(),
    };

    Some(SearchResult {
        result_type,
        title,
        id: data.get("id").and_then(as_id),
        year: data.get("year").cloned(),
        country: data.get("country").cloned(),
        format: data.get("format").cloned(),
    })
}

// ============================================================================
// Release
// ============================================================================

/// Normalize a raw release into a [`ReleaseDetail`].
///
/// The output `id` is the requested id rather than whatever the payload
/// echoes back.
pub fn release_detail(release_id: u64, raw: RawRelease) -> ReleaseDetail {
    let RawRelease { fields, tracklist } = raw;

    let mut tracks = Vec::with_capacity(tracklist.len());
    let mut skipped_tracks = 0;
    for (index, track) in tracklist.into_iter().enumerate() {
        match track_info(track) {
            Some(info) => tracks.push(info),
            None => {
                warn!(
                    "Skipping tracklist entry {} of release {}: not a track",
                    index, release_id
                );
                skipped_tracks += 1;
            }
        }
    }

    ReleaseDetail {
        id: release_id,
        title: fields.get("title").and_then(as_text),
        year: scalar(&fields, "year"),
        country: scalar(&fields, "country"),
        artists: entity_refs(&fields, "artists"),
        labels: entity_refs(&fields, "labels"),
        formats: sequence(&fields, "formats"),
        genres: sequence(&fields, "genres"),
        styles: sequence(&fields, "styles"),
        tracklist: tracks,
        skipped_tracks,
    }
}

/// Normalize one tracklist entry, whichever shape it arrived in.
pub fn track_info(track: RawTrack) -> Option<TrackInfo> {
    match track {
        RawTrack::Map(map) => Some(TrackInfo {
            position: scalar(&map, "position"),
            title: scalar(&map, "title"),
            duration: scalar(&map, "duration"),
        }),
        RawTrack::Record(TrackRecord {
            position,
            title,
            duration,
        }) => Some(TrackInfo {
            position: position.map(Value::String),
            title: title.map(Value::String),
            duration: duration.map(Value::String),
        }),
        RawTrack::Unrecognized(_) => None,
    }
}

// ============================================================================
// Marketplace
// ============================================================================

/// Extract lowest price and listing count from a marketplace stats body.
pub fn marketplace_stats(release_id: u64, body: &Value) -> MarketplaceStats {
    let lowest_price = body
        .get("lowest_price")
        .and_then(|price| price.get("value"))
        .and_then(Value::as_f64);

    MarketplaceStats {
        release_id,
        lowest_price,
        active_listings: body.get("num_for_sale").and_then(Value::as_u64),
    }
}

// ============================================================================
// Field Helpers
// ============================================================================

/// A scalar field, with explicit `null` folded into absent.
fn scalar(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).filter(|v| !v.is_null()).cloned()
}

/// A list field; absent or non-array values become empty.
fn sequence(map: &Map<String, Value>, key: &str) -> Vec<Value> {
    match map.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Project a list of credit objects onto `{name, id}` pairs.
fn entity_refs(map: &Map<String, Value>, key: &str) -> Vec<EntityRef> {
    let Some(Value::Array(items)) = map.get(key) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|credit| EntityRef {
            name: credit.get("name").and_then(as_text),
            id: credit.get("id").and_then(as_id),
        })
        .collect()
}

/// Discogs ids are integers, occasionally serialized as strings.
fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered_items(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"type": "release", "title": format!("Release {}", i), "id": i}))
            .collect()
    }

    #[test]
    fn test_search_truncates_to_ten() {
        let response = search_response("nirvana", numbered_items(37));
        assert_eq!(response.count, 10);
        assert_eq!(response.results.len(), 10);
        assert_eq!(response.results[9].title, "Release 9");
    }

    #[test]
    fn test_search_keeps_short_lists_in_order() {
        let response = search_response("nirvana", numbered_items(3));
        assert_eq!(response.count, 3);
        let ids: Vec<_> = response.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_search_empty() {
        let response = search_response("zzzz", Vec::new());
        assert_eq!(response.count, 0);
        assert!(response.results.is_empty());
        assert_eq!(response.query, "zzzz");
    }

    #[test]
    fn test_search_skips_non_objects_and_keeps_filling() {
        let mut items = vec![json!("oops"), json!(42)];
        items.extend(numbered_items(12));
        let response = search_response("q", items);
        assert_eq!(response.count, 10);
        assert_eq!(response.skipped, 2);
        assert_eq!(response.results[0].title, "Release 0");
    }

    #[test]
    fn test_search_result_defaults() {
        let item = json!({"uri": "/artist/1"});
        let result = search_result(&item).unwrap();
        assert_eq!(result.result_type, "unknown");
        assert_eq!(result.title, item.to_string());
        assert_eq!(result.id, None);
        assert_eq!(result.year, None);
    }

    #[test]
    fn test_search_result_copies_optional_fields_when_present() {
        let item = json!({
            "type": "release",
            "title": "Nirvana - Nevermind",
            "id": 367084,
            "year": "1991",
            "country": null,
            "format": ["Vinyl", "LP", "Album"]
        });
        let result = search_result(&item).unwrap();
        assert_eq!(result.year, Some(json!("1991")));
        assert_eq!(result.country, Some(Value::Null));
        assert_eq!(result.format, Some(json!(["Vinyl", "LP", "Album"])));
    }

    #[test]
    fn test_search_result_string_id() {
        let result = search_result(&json!({"id": "367084"})).unwrap();
        assert_eq!(result.id, Some(367084));
    }

    #[test]
    fn test_release_mixed_track_shapes() {
        let raw = RawRelease {
            fields: Map::new(),
            tracklist: vec![
                RawTrack::from(json!({"position": "A1", "title": "Smells Like Teen Spirit", "duration": "5:01"})),
                RawTrack::from(TrackRecord {
                    position: Some("A2".to_string()),
                    title: Some("In Bloom".to_string()),
                    duration: None,
                }),
                RawTrack::from(json!({"title": "Come As You Are"})),
            ],
        };

        let detail = release_detail(367084, raw);
        assert_eq!(detail.skipped_tracks, 0);
        assert_eq!(
            detail.tracklist,
            vec![
                TrackInfo {
                    position: Some(json!("A1")),
                    title: Some(json!("Smells Like Teen Spirit")),
                    duration: Some(json!("5:01")),
                },
                TrackInfo {
                    position: Some(json!("A2")),
                    title: Some(json!("In Bloom")),
                    duration: None,
                },
                TrackInfo {
                    position: None,
                    title: Some(json!("Come As You Are")),
                    duration: None,
                },
            ]
        );
    }

    #[test]
    fn test_release_skips_unrecognized_tracks() {
        let raw = RawRelease::from_value(json!({
            "tracklist": [null, {"position": "1"}, ["x"]]
        }))
        .unwrap();
        let detail = release_detail(1, raw);
        assert_eq!(detail.tracklist.len(), 1);
        assert_eq!(detail.skipped_tracks, 2);
    }

    #[test]
    fn test_release_missing_fields_default() {
        let detail = release_detail(42, RawRelease::default());
        assert_eq!(detail.id, 42);
        assert_eq!(detail.title, None);
        assert_eq!(detail.year, None);
        assert!(detail.artists.is_empty());
        assert!(detail.labels.is_empty());
        assert!(detail.formats.is_empty());
        assert!(detail.genres.is_empty());
        assert!(detail.styles.is_empty());
        assert!(detail.tracklist.is_empty());

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["artists"], json!([]));
        assert_eq!(value["title"], Value::Null);
    }

    #[test]
    fn test_release_projects_credits() {
        let raw = RawRelease::from_value(json!({
            "title": "Nevermind",
            "year": 1991,
            "country": "US",
            "artists": [{"name": "Nirvana", "id": 125246, "anv": "", "role": ""}, "junk"],
            "labels": [{"name": "DGC", "id": 1, "catno": "DGC-24425"}],
            "formats": [{"name": "Vinyl", "qty": "1"}],
            "genres": ["Rock"],
            "styles": "Grunge"
        }))
        .unwrap();

        let detail = release_detail(367084, raw);
        assert_eq!(detail.title.as_deref(), Some("Nevermind"));
        assert_eq!(detail.year, Some(json!(1991)));
        assert_eq!(
            detail.artists,
            vec![EntityRef {
                name: Some("Nirvana".to_string()),
                id: Some(125246),
            }]
        );
        assert_eq!(detail.labels[0].name.as_deref(), Some("DGC"));
        assert_eq!(detail.formats, vec![json!({"name": "Vinyl", "qty": "1"})]);
        assert_eq!(detail.genres, vec![json!("Rock")]);
        assert!(detail.styles.is_empty());
    }

    #[test]
    fn test_marketplace_stats_full() {
        let body = json!({
            "lowest_price": {"value": 12.5, "currency": "USD"},
            "num_for_sale": 3,
            "blocked_from_sale": false
        });
        let stats = marketplace_stats(249504, &body);
        assert_eq!(stats.release_id, 249504);
        assert_eq!(stats.lowest_price, Some(12.5));
        assert_eq!(stats.active_listings, Some(3));
    }

    #[test]
    fn test_marketplace_stats_tolerates_odd_shapes() {
        let stats = marketplace_stats(1, &json!({"lowest_price": null, "num_for_sale": 0}));
        assert_eq!(stats.lowest_price, None);
        assert_eq!(stats.active_listings, Some(0));

        let stats = marketplace_stats(1, &json!({"lowest_price": 9.99, "num_for_sale": "lots"}));
        assert_eq!(stats.lowest_price, None);
        assert_eq!(stats.active_listings, None);

        let stats = marketplace_stats(1, &json!([]));
        assert_eq!(stats.lowest_price, None);
        assert_eq!(stats.active_listings, None);
    }
}

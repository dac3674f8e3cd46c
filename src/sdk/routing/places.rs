use super::point::GeoPoint;

/// Pickup points around campus that are looked up locally, (name, lon, lat).
pub const CAMPUS_PLACES: [(&str, f64, f64); 5] = [
    ("Gulmohar Park", 72.9118, 19.1342),
    ("IITB Main Gate", 72.9133, 19.1334),
    ("Hiranandani", 72.9196, 19.1292),
    ("Powai Lake", 72.9075, 19.1231),
    ("Kanjurmarg", 72.9500, 19.1390),
];

/// Finds a named campus place. Matching ignores surrounding whitespace and
/// ASCII case.
pub fn campus_place(name: &str) -> Option<GeoPoint> {
    let name = name.trim();
    CAMPUS_PLACES
        .iter()
        .find(|(known, _, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, lon, lat)| GeoPoint::new_unchecked(lon, lat))
}

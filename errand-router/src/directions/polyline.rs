//! Encoded polyline format (precision 5).
//!
//! Each value is scaled by 1e5, delta-encoded against the previous point,
//! zig-zag encoded and emitted as 5-bit chunks offset by 63.

use crate::domain::Coordinate;

const PRECISION: f64 = 1e5;

/// Encode points as a polyline string.
pub fn encode_polyline(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn encode_value(delta: i64, out: &mut String) {
    let zigzag = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = zigzag as u64;
    while value >= 0x20 {
        out.push((((value & 0x1f) | 0x20) as u8 + 63) as char);
        value >>= 5;
    }
    out.push((value as u8 + 63) as char);
}

/// Decode a polyline string.
///
/// Returns `None` if the string is truncated or contains bytes outside the
/// encoding alphabet.
pub fn decode_polyline(encoded: &str) -> Option<Vec<Coordinate>> {
    let mut bytes = encoded.bytes();
    let mut points = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;

    loop {
        let Some(dlat) = decode_value(&mut bytes, true)? else {
            break;
        };
        let dlng = decode_value(&mut bytes, false)??;
        lat += dlat;
        lng += dlng;
        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Some(points)
}

/// Read one value. `Some(None)` means clean end of input, which is only
/// allowed at the start of a point.
fn decode_value(bytes: &mut impl Iterator<Item = u8>, at_point_start: bool) -> Option<Option<i64>> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut first = true;

    loop {
        let Some(b) = bytes.next() else {
            return if first && at_point_start { Some(None) } else { None };
        };
        first = false;
        if !(63..=126).contains(&b) || shift > 60 {
            return None;
        }
        let chunk = (b - 63) as u64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    let value = if result & 1 == 1 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };
    Some(Some(value))
}

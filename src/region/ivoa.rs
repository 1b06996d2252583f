//! The IVOA POS textual region syntax (`CIRCLE`, `RANGE`, `POLYGON`).
//!
//! Coordinates and radii are in degrees. The shape keyword is
//! case-sensitive; `±Inf` bounds are allowed in `RANGE` only, clamping to
//! the coordinate limits.

use super::{Circle, ConvexPolygon, LonLatBox, Region};
use crate::{
    error::{NotImplemented, PosParseError},
    Angle, LonLat, UnitVector3d,
};

/// Parses an IVOA POS string.
pub(crate) fn from_pos(pos: &str) -> Result<Region, PosParseError> {
    let mut tokens = pos.split_whitespace();
    let shape = tokens
        .next()
        .ok_or_else(|| PosParseError::new("empty POS string"))?;
    let args: Vec<&str> = tokens.collect();
    match shape {
        "CIRCLE" => from_circle(&args),
        "RANGE" => from_range(&args),
        "POLYGON" => from_polygon(&args),
        _ => Err(PosParseError::new("unknown POS shape")),
    }
}

fn from_circle(args: &[&str]) -> Result<Region, PosParseError> {
    if args.len() != 3 {
        return Err(PosParseError::new("CIRCLE takes exactly 3 numbers"));
    }
    let lon = parse_finite(args[0])?;
    let lat = parse_finite(args[1])?;
    let radius = parse_finite(args[2])?;
    let center = LonLat::from_degrees(lon, lat)
        .map_err(|_| PosParseError::new("invalid CIRCLE center"))?;
    Ok(Region::Circle(Circle::from_angle(
        UnitVector3d::from(&center),
        Angle::from_degrees(radius),
    )))
}

fn from_range(args: &[&str]) -> Result<Region, PosParseError> {
    if args.len() != 4 {
        return Err(PosParseError::new("RANGE takes exactly 4 numbers"));
    }
    // Infinite bounds are legal here and clamp to the coordinate limits.
    let lon1 = clamp_infinite(parse_number(args[0])?, 0.0, 360.0);
    let lon2 = clamp_infinite(parse_number(args[1])?, 0.0, 360.0);
    let lat1 = clamp_infinite(parse_number(args[2])?, -90.0, 90.0);
    let lat2 = clamp_infinite(parse_number(args[3])?, -90.0, 90.0);
    Ok(Region::Box(LonLatBox::from_degrees(lon1, lat1, lon2, lat2)))
}

fn from_polygon(args: &[&str]) -> Result<Region, PosParseError> {
    if args.len() < 6 || args.len() % 2 != 0 {
        return Err(PosParseError::new(
            "POLYGON takes an even number of at least 6 numbers",
        ));
    }
    let mut vertices = Vec::with_capacity(args.len() / 2);
    for pair in args.chunks_exact(2) {
        let lon = parse_finite(pair[0])?;
        let lat = parse_finite(pair[1])?;
        let point = LonLat::from_degrees(lon, lat)
            .map_err(|_| PosParseError::new("invalid POLYGON vertex"))?;
        vertices.push(UnitVector3d::from(&point));
    }
    ConvexPolygon::convex_hull(&vertices)
        .map(Region::Polygon)
        .map_err(|_| PosParseError::new("degenerate POLYGON vertex list"))
}

fn parse_number(token: &str) -> Result<f64, PosParseError> {
    let value = token
        .parse::<f64>()
        .map_err(|_| PosParseError::new("malformed number"))?;
    if value.is_nan() {
        return Err(PosParseError::new("malformed number"));
    }
    Ok(value)
}

fn parse_finite(token: &str) -> Result<f64, PosParseError> {
    let value = parse_number(token)?;
    if !value.is_finite() {
        return Err(PosParseError::new("number must be finite"));
    }
    Ok(value)
}

fn clamp_infinite(value: f64, lo: f64, hi: f64) -> f64 {
    if value == f64::NEG_INFINITY {
        lo
    } else if value == f64::INFINITY {
        hi
    } else {
        value
    }
}

/// Formats `region` as an IVOA POS string.
pub(crate) fn to_pos(region: &Region) -> Result<String, NotImplemented> {
    match region {
        Region::Circle(c) => {
            let center = LonLat::from(c.center());
            Ok(format!(
                "CIRCLE {} {} {}",
                center.lon().as_degrees(),
                center.lat().as_degrees(),
                c.opening_angle().as_degrees()
            ))
        }
        Region::Box(b) => {
            let (lon1, lon2) = if b.get_lon().is_full() {
                (0.0, 360.0)
            } else {
                (
                    b.get_lon().get_a().as_degrees(),
                    b.get_lon().get_b().as_degrees(),
                )
            };
            Ok(format!(
                "RANGE {} {} {} {}",
                lon1,
                lon2,
                b.get_lat().get_a().as_degrees(),
                b.get_lat().get_b().as_degrees()
            ))
        }
        Region::Polygon(p) => {
            let mut out = String::from("POLYGON");
            for v in p.vertices() {
                let point = LonLat::from(v);
                out.push_str(&format!(
                    " {} {}",
                    point.lon().as_degrees(),
                    point.lat().as_degrees()
                ));
            }
            Ok(out)
        }
        _ => Err(NotImplemented::new(
            "region is not expressible as an IVOA POS string",
        )),
    }
}

#[cfg(test)]
#[path = "./ivoa_tests.rs"]
mod tests;

//! The tagged binary region codec and its base64 list forms.
//!
//! Every region encodes as one tag byte followed by its fields as
//! little-endian IEEE-754 doubles; compound regions carry a little-endian
//! `u32` operand count followed by the recursive encodings.

use super::{
    Circle, ConvexPolygon, Ellipse, IntersectionRegion, LonLatBox, Region,
    UnionRegion,
};
use crate::{
    error::DecodeError, Angle, AngleInterval, NormalizedAngleInterval,
    UnitVector3d,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const TAG_BOX: u8 = 1;
const TAG_CIRCLE: u8 = 2;
const TAG_ELLIPSE: u8 = 3;
const TAG_POLYGON: u8 = 4;
const TAG_UNION: u8 = 5;
const TAG_INTERSECTION: u8 = 6;

/// Encodes `region` into the tagged binary format.
pub(crate) fn encode(region: &Region) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    encode_into(region, &mut out);
    out
}

fn encode_into(region: &Region, out: &mut Vec<u8>) {
    match region {
        Region::Box(b) => {
            out.push(TAG_BOX);
            put_f64(out, b.get_lon().get_a().as_radians());
            put_f64(out, box_lon_end(b));
            put_f64(out, b.get_lat().get_a().as_radians());
            put_f64(out, b.get_lat().get_b().as_radians());
        }
        Region::Circle(c) => {
            out.push(TAG_CIRCLE);
            put_f64(out, c.center().x());
            put_f64(out, c.center().y());
            put_f64(out, c.center().z());
            put_f64(out, c.squared_chord_length());
        }
        Region::Ellipse(e) => {
            out.push(TAG_ELLIPSE);
            for focus in [e.get_f1(), e.get_f2()] {
                put_f64(out, focus.x());
                put_f64(out, focus.y());
                put_f64(out, focus.z());
            }
            put_f64(out, e.get_alpha().as_radians());
        }
        Region::Polygon(p) => {
            out.push(TAG_POLYGON);
            put_u32(out, p.vertices().len());
            for v in p.vertices() {
                put_f64(out, v.x());
                put_f64(out, v.y());
                put_f64(out, v.z());
            }
        }
        Region::Union(u) => {
            out.push(TAG_UNION);
            put_u32(out, u.operands().len());
            for operand in u.operands() {
                encode_into(operand, out);
            }
        }
        Region::Intersection(i) => {
            out.push(TAG_INTERSECTION);
            put_u32(out, i.operands().len());
            for operand in i.operands() {
                encode_into(operand, out);
            }
        }
    }
}

/// The encoded end of a box's longitude interval.
///
/// The full circle encodes as 2π so that decoding restores fullness.
fn box_lon_end(b: &LonLatBox) -> f64 {
    if b.get_lon().is_full() {
        crate::TWO_PI
    } else {
        b.get_lon().get_b().as_radians()
    }
}

/// Decodes a region from the tagged binary format.
pub(crate) fn decode(bytes: &[u8]) -> Result<Region, DecodeError> {
    let mut reader = Reader { bytes, pos: 0 };
    let region = decode_region(&mut reader)?;
    if reader.pos != bytes.len() {
        return Err(DecodeError::new("trailing bytes after region"));
    }
    Ok(region)
}

fn decode_region(reader: &mut Reader<'_>) -> Result<Region, DecodeError> {
    match reader.u8()? {
        TAG_BOX => {
            let lon_a = reader.angle()?;
            let lon_b = reader.angle()?;
            let lat_a = reader.angle()?;
            let lat_b = reader.angle()?;
            let lon = if lon_a.is_nan() || lon_b.is_nan() {
                NormalizedAngleInterval::empty()
            } else {
                NormalizedAngleInterval::from_radians(lon_a, lon_b)
            };
            Ok(Region::Box(LonLatBox::new(
                lon,
                AngleInterval::from_radians(lat_a, lat_b),
            )))
        }
        TAG_CIRCLE => {
            let center = reader.unit_vector()?;
            let scl = reader.f64()?;
            if scl > 4.0 || scl.is_infinite() {
                return Err(DecodeError::new(
                    "circle chord length out of range",
                ));
            }
            Ok(Region::Circle(Circle::new(center, scl)))
        }
        TAG_ELLIPSE => {
            let f1 = reader.unit_vector()?;
            let f2 = reader.unit_vector()?;
            let alpha = reader.f64()?;
            if alpha.is_infinite() {
                return Err(DecodeError::new("non-finite ellipse angle"));
            }
            Ok(Region::Ellipse(Ellipse::new(f1, f2, Angle::new(alpha))))
        }
        TAG_POLYGON => {
            let n = reader.u32()? as usize;
            if n < 3 {
                return Err(DecodeError::new(
                    "polygon with fewer than 3 vertices",
                ));
            }
            let mut vertices = Vec::with_capacity(n);
            for _ in 0..n {
                vertices.push(reader.unit_vector()?);
            }
            ConvexPolygon::new(vertices)
                .map(Region::Polygon)
                .map_err(|_| DecodeError::new("invalid polygon vertex list"))
        }
        TAG_UNION => {
            let n = reader.u32()? as usize;
            let mut operands = Vec::with_capacity(n);
            for _ in 0..n {
                operands.push(decode_region(reader)?);
            }
            Ok(Region::Union(UnionRegion::new(operands)))
        }
        TAG_INTERSECTION => {
            let n = reader.u32()? as usize;
            let mut operands = Vec::with_capacity(n);
            for _ in 0..n {
                operands.push(decode_region(reader)?);
            }
            Ok(Region::Intersection(IntersectionRegion::new(operands)))
        }
        _ => Err(DecodeError::new("unknown region tag")),
    }
}

/// Decodes a region, or a `:`-separated union of regions, from base64.
pub(crate) fn decode_base64(s: &str) -> Result<Region, DecodeError> {
    if s.is_empty() {
        return Ok(Region::Union(UnionRegion::new(Vec::new())));
    }
    if !s.contains(':') {
        return decode(&decode_b64_bytes(s)?);
    }
    let mut operands = Vec::new();
    for part in s.split(':') {
        operands.push(decode(&decode_b64_bytes(part)?)?);
    }
    Ok(Region::Union(UnionRegion::new(operands)))
}

/// Evaluates a `|`-joined disjunction of `A&B` overlap terms.
pub(crate) fn decode_overlaps_base64(
    s: &str,
) -> Result<Option<bool>, DecodeError> {
    if s.is_empty() {
        return Ok(Some(false));
    }
    let mut undecided = false;
    for term in s.split('|') {
        let (lhs, rhs) = term.split_once('&').ok_or_else(|| {
            DecodeError::new("overlap term is not a region pair")
        })?;
        if rhs.contains('&') {
            return Err(DecodeError::new("overlap term is not a region pair"));
        }
        let a = decode(&decode_b64_bytes(lhs)?)?;
        let b = decode(&decode_b64_bytes(rhs)?)?;
        match a.overlaps(&b) {
            Some(true) => return Ok(Some(true)),
            Some(false) => {}
            None => undecided = true,
        }
    }
    if undecided {
        Ok(None)
    } else {
        Ok(Some(false))
    }
}

fn decode_b64_bytes(s: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD
        .decode(s)
        .map_err(|_| DecodeError::new("invalid base64"))
}

fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[allow(clippy::cast_possible_truncation)]
fn put_u32(out: &mut Vec<u8>, value: usize) {
    debug_assert!(value <= u32::MAX as usize);
    out.extend_from_slice(&(value as u32).to_le_bytes());
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| DecodeError::new("truncated region"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let end = self.pos + 4;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| DecodeError::new("truncated region"))?;
        self.pos = end;
        let mut buf = [0_u8; 4];
        buf.copy_from_slice(slice);
        Ok(u32::from_le_bytes(buf))
    }

    fn f64(&mut self) -> Result<f64, DecodeError> {
        let end = self.pos + 8;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| DecodeError::new("truncated region"))?;
        self.pos = end;
        let mut buf = [0_u8; 8];
        buf.copy_from_slice(slice);
        Ok(f64::from_le_bytes(buf))
    }

    /// Reads an angle: finite values and NaN (the empty-interval marker)
    /// are accepted, infinities are not.
    fn angle(&mut self) -> Result<f64, DecodeError> {
        let value = self.f64()?;
        if value.is_infinite() {
            return Err(DecodeError::new("non-finite angle"));
        }
        Ok(value)
    }

    fn unit_vector(&mut self) -> Result<UnitVector3d, DecodeError> {
        let x = self.f64()?;
        let y = self.f64()?;
        let z = self.f64()?;
        UnitVector3d::new(x, y, z)
            .map_err(|_| DecodeError::new("invalid unit vector"))
    }
}

#[cfg(test)]
#[path = "./codec_tests.rs"]
mod tests;

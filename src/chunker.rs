use crate::{
    error::InvalidChunking, AngleInterval, LonLatBox,
    NormalizedAngleInterval, Region, Relationship, TWO_PI,
};
use std::{f64::consts::FRAC_PI_2, fmt};

/// Latitudes closer to a pole than this count as polar when segmenting.
const POLE_EPSILON: f64 = 4.85e-6;

/// The sub-chunks of a single chunk that intersect a region.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubChunks {
    /// The chunk id.
    pub chunk_id: i32,
    /// The intersecting sub-chunk ids within that chunk, ascending.
    pub sub_chunk_ids: Vec<i32>,
}

/// A partitioning of the sphere into latitude stripes, chunks and
/// sub-chunks, for coarse spatial database partitioning.
///
/// Latitude is divided into `num_stripes` bands of equal height; each
/// stripe holds a number of equal-width chunks proportional to the cosine
/// of its extreme latitude, so chunk areas stay roughly constant. Chunks
/// subdivide the same way into `num_sub_stripes_per_stripe` sub-bands of
/// sub-chunks. `chunk_id = stripe · 2 · num_stripes + chunk_in_stripe`;
/// `sub_chunk_id = local_sub_stripe · max_sub_chunks_per_chunk +
/// local_sub_chunk`.
#[derive(Clone, Debug)]
pub struct Chunker {
    num_stripes: i32,
    num_sub_stripes_per_stripe: i32,
    stripe_height: f64,
    sub_stripe_height: f64,
    max_sub_chunks_per_chunk: i64,
    stripes: Vec<Stripe>,
    sub_stripes: Vec<SubStripe>,
}

#[derive(Clone, Debug)]
struct Stripe {
    num_chunks: i64,
    chunk_width: f64,
}

#[derive(Clone, Debug)]
struct SubStripe {
    num_sub_chunks_per_chunk: i64,
    sub_chunk_width: f64,
}

impl Chunker {
    /// Initializes a new chunker.
    ///
    /// # Errors
    ///
    /// [`InvalidChunking`] unless both counts are at least 1.
    pub fn new(
        num_stripes: i32,
        num_sub_stripes_per_stripe: i32,
    ) -> Result<Self, InvalidChunking> {
        if num_stripes < 1 {
            return Err(InvalidChunking::new(num_stripes, "out of range"));
        }
        if num_sub_stripes_per_stripe < 1 {
            return Err(InvalidChunking::new(
                num_sub_stripes_per_stripe,
                "out of range",
            ));
        }
        let stripe_height = std::f64::consts::PI / f64::from(num_stripes);
        let num_sub_stripes = num_stripes * num_sub_stripes_per_stripe;
        let sub_stripe_height =
            std::f64::consts::PI / f64::from(num_sub_stripes);

        let stripes: Vec<Stripe> = (0..num_stripes)
            .map(|s| {
                let lat1 = f64::from(s) * stripe_height - FRAC_PI_2;
                let lat2 = f64::from(s + 1) * stripe_height - FRAC_PI_2;
                let num_chunks = segments(lat1, lat2, stripe_height);
                Stripe {
                    num_chunks,
                    chunk_width: TWO_PI / num_chunks as f64,
                }
            })
            .collect();

        let mut max_sub_chunks_per_chunk = 0;
        let sub_stripes: Vec<SubStripe> = (0..num_sub_stripes)
            .map(|ss| {
                let lat1 = f64::from(ss) * sub_stripe_height - FRAC_PI_2;
                let lat2 = f64::from(ss + 1) * sub_stripe_height - FRAC_PI_2;
                let num_chunks = stripes
                    [(ss / num_sub_stripes_per_stripe) as usize]
                    .num_chunks;
                let num_sub_chunks =
                    segments(lat1, lat2, sub_stripe_height);
                let num_sub_chunks_per_chunk =
                    (num_sub_chunks / num_chunks).max(1);
                max_sub_chunks_per_chunk =
                    max_sub_chunks_per_chunk.max(num_sub_chunks_per_chunk);
                SubStripe {
                    num_sub_chunks_per_chunk,
                    sub_chunk_width: TWO_PI
                        / (num_sub_chunks_per_chunk * num_chunks) as f64,
                }
            })
            .collect();

        Ok(Self {
            num_stripes,
            num_sub_stripes_per_stripe,
            stripe_height,
            sub_stripe_height,
            max_sub_chunks_per_chunk,
            stripes,
            sub_stripes,
        })
    }

    /// The number of latitude stripes.
    #[must_use]
    pub const fn num_stripes(&self) -> i32 {
        self.num_stripes
    }

    /// The number of sub-stripes per stripe.
    #[must_use]
    pub const fn num_sub_stripes_per_stripe(&self) -> i32 {
        self.num_sub_stripes_per_stripe
    }

    /// The stripe of a chunk id.
    #[must_use]
    pub const fn get_stripe(&self, chunk_id: i32) -> i32 {
        chunk_id / (2 * self.num_stripes)
    }

    /// The chunk-within-stripe of a chunk id.
    #[must_use]
    pub const fn get_chunk(&self, chunk_id: i32, stripe: i32) -> i32 {
        chunk_id - stripe * 2 * self.num_stripes
    }

    /// The chunk id of the given stripe and chunk-within-stripe.
    const fn chunk_id(&self, stripe: i32, chunk: i32) -> i32 {
        stripe * 2 * self.num_stripes + chunk
    }

    /// The ids of the chunks whose boxes intersect `region`, ascending.
    #[must_use]
    pub fn get_chunks_intersecting(&self, region: &Region) -> Vec<i32> {
        let mut chunks = Vec::new();
        self.for_each_candidate_chunk(region, |chunker, stripe, chunk| {
            chunks.push(chunker.chunk_id(stripe, chunk));
        });
        chunks
    }

    /// The ids of the intersecting sub-chunks of every chunk intersecting
    /// `region`.
    #[must_use]
    pub fn get_sub_chunks_intersecting(
        &self,
        region: &Region,
    ) -> Vec<SubChunks> {
        let bbox = region.bounding_box();
        let mut out = Vec::new();
        self.for_each_candidate_chunk(region, |chunker, stripe, chunk| {
            let sub_chunk_ids =
                chunker.sub_chunks_of(region, &bbox, stripe, chunk);
            if !sub_chunk_ids.is_empty() {
                out.push(SubChunks {
                    chunk_id: chunker.chunk_id(stripe, chunk),
                    sub_chunk_ids,
                });
            }
        });
        out
    }

    /// All chunk ids of this chunker, ascending.
    #[must_use]
    pub fn get_all_chunks(&self) -> Vec<i32> {
        let mut chunks = Vec::new();
        for stripe in 0..self.num_stripes {
            #[allow(clippy::cast_possible_truncation)]
            let num_chunks = self.stripes[stripe as usize].num_chunks as i32;
            for chunk in 0..num_chunks {
                chunks.push(self.chunk_id(stripe, chunk));
            }
        }
        chunks
    }

    /// All sub-chunk ids of the given chunk, ascending.
    #[must_use]
    pub fn get_all_sub_chunk_ids(&self, chunk_id: i32) -> Vec<i32> {
        let stripe = self.get_stripe(chunk_id);
        let mut ids = Vec::new();
        for local_ss in 0..self.num_sub_stripes_per_stripe {
            let ss = stripe * self.num_sub_stripes_per_stripe + local_ss;
            let num_sub_chunks =
                self.sub_stripes[ss as usize].num_sub_chunks_per_chunk;
            for sc in 0..num_sub_chunks {
                #[allow(clippy::cast_possible_truncation)]
                ids.push(
                    (i64::from(local_ss) * self.max_sub_chunks_per_chunk + sc)
                        as i32,
                );
            }
        }
        ids
    }

    /// The box of the chunk at the given stripe and chunk-within-stripe.
    #[must_use]
    pub fn get_chunk_bounding_box(&self, stripe: i32, chunk: i32) -> LonLatBox {
        let width = self.stripes[stripe as usize].chunk_width;
        let lat1 = f64::from(stripe) * self.stripe_height - FRAC_PI_2;
        let lat2 = f64::from(stripe + 1) * self.stripe_height - FRAC_PI_2;
        LonLatBox::new(
            lon_interval(f64::from(chunk) * width, f64::from(chunk + 1) * width),
            AngleInterval::from_radians(lat1, lat2),
        )
    }

    /// The box of the sub-chunk at the given (global) sub-stripe and
    /// sub-chunk-within-sub-stripe.
    #[must_use]
    pub fn get_sub_chunk_bounding_box(
        &self,
        sub_stripe: i32,
        sub_chunk: i32,
    ) -> LonLatBox {
        let width = self.sub_stripes[sub_stripe as usize].sub_chunk_width;
        let lat1 = f64::from(sub_stripe) * self.sub_stripe_height - FRAC_PI_2;
        let lat2 =
            f64::from(sub_stripe + 1) * self.sub_stripe_height - FRAC_PI_2;
        LonLatBox::new(
            lon_interval(
                f64::from(sub_chunk) * width,
                f64::from(sub_chunk + 1) * width,
            ),
            AngleInterval::from_radians(lat1, lat2),
        )
    }

    /// Invokes `visit` for every (stripe, chunk) whose box intersects
    /// `region`, in ascending chunk id order.
    fn for_each_candidate_chunk(
        &self,
        region: &Region,
        mut visit: impl FnMut(&Self, i32, i32),
    ) {
        let bbox = region.bounding_box();
        if bbox.is_empty() {
            return;
        }
        let (min_stripe, max_stripe) = self.stripe_range(&bbox.get_lat());
        for stripe in min_stripe..=max_stripe {
            let info = &self.stripes[stripe as usize];
            let mut candidates: Vec<i64> = Vec::new();
            for (lo, hi) in lon_arcs(&bbox.get_lon()) {
                let c0 = grid_cell(lo, info.chunk_width, info.num_chunks);
                let c1 = grid_cell(hi, info.chunk_width, info.num_chunks);
                candidates.extend(c0..=c1);
            }
            candidates.sort_unstable();
            candidates.dedup();
            for chunk in candidates {
                #[allow(clippy::cast_possible_truncation)]
                let chunk = chunk as i32;
                let chunk_box = self.get_chunk_bounding_box(stripe, chunk);
                if !region
                    .relate(&Region::Box(chunk_box))
                    .contains(Relationship::DISJOINT)
                {
                    visit(self, stripe, chunk);
                }
            }
        }
    }

    /// The intersecting sub-chunk ids of one chunk, ascending.
    fn sub_chunks_of(
        &self,
        region: &Region,
        bbox: &LonLatBox,
        stripe: i32,
        chunk: i32,
    ) -> Vec<i32> {
        let stripe_info = &self.stripes[stripe as usize];
        let chunk_lo = f64::from(chunk) * stripe_info.chunk_width;
        let chunk_hi = f64::from(chunk + 1) * stripe_info.chunk_width;
        let mut ids = Vec::new();
        for local_ss in 0..self.num_sub_stripes_per_stripe {
            let ss = stripe * self.num_sub_stripes_per_stripe + local_ss;
            let lat1 = f64::from(ss) * self.sub_stripe_height - FRAC_PI_2;
            let lat2 = f64::from(ss + 1) * self.sub_stripe_height - FRAC_PI_2;
            if !bbox
                .get_lat()
                .intersects(AngleInterval::from_radians(lat1, lat2))
            {
                continue;
            }
            let info = &self.sub_stripes[ss as usize];
            let first = i64::from(chunk) * info.num_sub_chunks_per_chunk;
            let last = first + info.num_sub_chunks_per_chunk - 1;
            let mut candidates: Vec<i64> = Vec::new();
            for (lo, hi) in lon_arcs(&bbox.get_lon()) {
                let lo = lo.max(chunk_lo);
                let hi = hi.min(chunk_hi);
                if lo > hi {
                    continue;
                }
                let sc0 = (lo / info.sub_chunk_width).floor() as i64;
                let sc1 = (hi / info.sub_chunk_width).floor() as i64;
                candidates.extend(sc0.clamp(first, last)..=sc1.clamp(first, last));
            }
            candidates.sort_unstable();
            candidates.dedup();
            for sc in candidates {
                let sub_box = self.sub_chunk_box(ss, sc, info);
                if region
                    .relate(&Region::Box(sub_box))
                    .contains(Relationship::DISJOINT)
                {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation)]
                ids.push(
                    (i64::from(local_ss) * self.max_sub_chunks_per_chunk
                        + (sc - first)) as i32,
                );
            }
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// The box of a sub-chunk addressed by global indices.
    fn sub_chunk_box(&self, ss: i32, sc: i64, info: &SubStripe) -> LonLatBox {
        let lat1 = f64::from(ss) * self.sub_stripe_height - FRAC_PI_2;
        let lat2 = f64::from(ss + 1) * self.sub_stripe_height - FRAC_PI_2;
        LonLatBox::new(
            lon_interval(
                sc as f64 * info.sub_chunk_width,
                (sc + 1) as f64 * info.sub_chunk_width,
            ),
            AngleInterval::from_radians(lat1, lat2),
        )
    }

    /// The stripes overlapping a latitude interval.
    fn stripe_range(&self, lat: &AngleInterval) -> (i32, i32) {
        let to_stripe = |lat: f64| {
            let raw = ((lat + FRAC_PI_2) / self.stripe_height).floor();
            #[allow(clippy::cast_possible_truncation)]
            let stripe = raw as i32;
            stripe.clamp(0, self.num_stripes - 1)
        };
        (to_stripe(lat.get_a().as_radians()), to_stripe(lat.get_b().as_radians()))
    }
}

/// The number of equal longitude segments for a latitude band, targeting
/// the given segment height; bands touching a pole get one segment.
fn segments(lat1: f64, lat2: f64, width: f64) -> i64 {
    let lat = lat1.abs().max(lat2.abs());
    if lat > FRAC_PI_2 - POLE_EPSILON {
        return 1;
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = (TWO_PI * lat.cos() / width).floor() as i64;
    n.max(1)
}

/// The grid cell of a longitude, clamped into range.
fn grid_cell(lon: f64, width: f64, cells: i64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let cell = (lon / width).floor() as i64;
    cell.clamp(0, cells - 1)
}

/// The plain (non-wrapping) arcs of a longitude interval.
fn lon_arcs(lon: &NormalizedAngleInterval) -> Vec<(f64, f64)> {
    if lon.is_full() {
        return vec![(0.0, TWO_PI)];
    }
    let (a, b) = (lon.get_a().as_radians(), lon.get_b().as_radians());
    if lon.wraps() {
        vec![(0.0, b), (a, TWO_PI)]
    } else {
        vec![(a, b)]
    }
}

/// A longitude interval from raw grid bounds (a full turn saturates).
fn lon_interval(lo: f64, hi: f64) -> NormalizedAngleInterval {
    NormalizedAngleInterval::from_radians(lo, hi)
}

impl PartialEq for Chunker {
    fn eq(&self, other: &Self) -> bool {
        self.num_stripes == other.num_stripes
            && self.num_sub_stripes_per_stripe
                == other.num_sub_stripes_per_stripe
    }
}

impl Eq for Chunker {}

impl fmt::Display for Chunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunker({}, {})",
            self.num_stripes, self.num_sub_stripes_per_stripe
        )
    }
}

#[cfg(test)]
#[path = "./chunker_tests.rs"]
mod tests;

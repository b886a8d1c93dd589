// Built-in opponent: random fleet placement and probability-based targeting.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{search_placement, TargetCell};
use crate::common::Coordinate;
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::ship::{span, Orientation};
use crate::strategy::{
    AttackDecision, AttackRequest, AttackStrategy, PlacementRequest, PlacementStrategy,
    ShipPlacement,
};

/// Placements covering more observed hits get this much more weight per hit,
/// so cells next to confirmed hits stand out.
const HIT_BIAS: f64 = 10.0;
/// Lower temperature sharpens sampling towards the most likely cells.
const TEMPERATURE: f64 = 0.5;

/// Relative likelihood of a ship segment at each cell of `view`.
///
/// Every in-bounds placement of every length in `lengths` that avoids misses
/// and sunk cells adds its weight to the unknown cells it covers. The result
/// is indexed `[y][x]` and sums to 1 (uniform over unknown cells when no
/// placement fits).
pub fn calc_pdf(view: &[Vec<TargetCell>], lengths: &[usize]) -> Vec<Vec<f64>> {
    let size = view.len();
    let mut matrix = vec![vec![0.0f64; size]; size];
    let cell = |c: Coordinate| view[c.y][c.x];

    for &len in lengths.iter().filter(|&&l| l > 0 && l <= size) {
        for orientation in Orientation::BOTH {
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (size - len + 1, size),
                Orientation::Vertical => (size, size - len + 1),
            };
            for y in 0..max_y {
                for x in 0..max_x {
                    let anchor = Coordinate::new(x, y);
                    let mut blocked = false;
                    let mut n_hits = 0;
                    for c in span(anchor, len, orientation) {
                        match cell(c) {
                            TargetCell::Miss | TargetCell::Sunk => {
                                blocked = true;
                                break;
                            }
                            TargetCell::Hit => n_hits += 1,
                            TargetCell::Unknown => {}
                        }
                    }
                    if blocked {
                        continue;
                    }
                    let weight = HIT_BIAS.powi(n_hits);
                    for c in span(anchor, len, orientation) {
                        if cell(c) == TargetCell::Unknown {
                            matrix[c.y][c.x] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, view)
}

fn normalize(mut matrix: Vec<Vec<f64>>, view: &[Vec<TargetCell>]) -> Vec<Vec<f64>> {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        let unknown = view
            .iter()
            .flatten()
            .filter(|&&c| c == TargetCell::Unknown)
            .count();
        if unknown == 0 {
            return matrix;
        }
        let uniform = 1.0 / unknown as f64;
        for (row, view_row) in matrix.iter_mut().zip(view) {
            for (v, &c) in row.iter_mut().zip(view_row) {
                if c == TargetCell::Unknown {
                    *v = uniform;
                }
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut().flatten() {
        *v /= total;
    }
    matrix
}

/// Sample one of `candidates` weighted by `pdf` sharpened with `temperature`.
/// Falls back to a uniform pick when every candidate has zero weight.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[Vec<f64>],
    candidates: &[Coordinate],
    temperature: f64,
    rng: &mut R,
) -> Option<Coordinate> {
    if candidates.is_empty() {
        return None;
    }
    let weights: Vec<f64> = candidates
        .iter()
        .map(|c| pdf[c.y][c.x].powf(1.0 / temperature))
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Some(candidates[rng.random_range(0..candidates.len())]);
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (c, w) in candidates.iter().zip(&weights) {
        cumulative += w;
        if threshold < cumulative {
            return Some(*c);
        }
    }
    candidates.last().copied()
}

fn format_coords(coords: &[Coordinate]) -> String {
    coords
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Places the fleet at random positions.
pub struct RandomPlacer {
    rng: SmallRng,
    max_attempts: usize,
}

impl RandomPlacer {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

#[async_trait::async_trait]
impl PlacementStrategy for RandomPlacer {
    async fn place_fleet(
        &mut self,
        request: &PlacementRequest,
    ) -> anyhow::Result<Vec<ShipPlacement>> {
        if request.board_size == 0 {
            anyhow::bail!("cannot place ships on an empty board");
        }
        let mut taken: HashSet<Coordinate> = HashSet::new();
        let mut out = Vec::with_capacity(request.ship_lengths.len());
        for &length in &request.ship_lengths {
            let (anchor, orientation) = search_placement(
                &mut self.rng,
                request.board_size,
                length,
                self.max_attempts,
                |c| taken.contains(&c),
            )
            .ok_or_else(|| anyhow::anyhow!("no room for a ship of length {}", length))?;
            taken.extend(span(anchor, length, orientation));
            out.push(ShipPlacement {
                anchor,
                length,
                orientation,
            });
        }
        Ok(out)
    }
}

/// Attack strategy that samples from [`calc_pdf`].
pub struct ProbabilityTargeter {
    rng: SmallRng,
    ship_lengths: Vec<usize>,
}

impl ProbabilityTargeter {
    /// `ship_lengths` are the lengths of the fleet being hunted. They are
    /// only used when a request carries no `remaining_lengths`.
    pub fn new(rng: SmallRng, ship_lengths: Vec<usize>) -> Self {
        Self { rng, ship_lengths }
    }

    pub fn seeded(seed: u64, ship_lengths: Vec<usize>) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), ship_lengths)
    }

    /// Choose a target synchronously.
    pub fn decide(&mut self, request: &AttackRequest) -> anyhow::Result<AttackDecision> {
        let lengths = if request.remaining_lengths.is_empty() {
            &self.ship_lengths
        } else {
            &request.remaining_lengths
        };
        let pdf = calc_pdf(&request.view, lengths);
        let coordinate = sample_pdf(&pdf, &request.available, TEMPERATURE, &mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("no coordinates left to attack"))?;
        let rationale = if request.active_hits.is_empty() {
            format!(
                "Hunting mode: no open hits, {} is among the likeliest cells to hide a ship.",
                coordinate
            )
        } else {
            format!(
                "Targeting mode: {} lines up with the open hits at {}.",
                coordinate,
                format_coords(&request.active_hits)
            )
        };
        Ok(AttackDecision {
            coordinate,
            rationale,
        })
    }
}

#[async_trait::async_trait]
impl AttackStrategy for ProbabilityTargeter {
    async fn choose_attack(&mut self, request: &AttackRequest) -> anyhow::Result<AttackDecision> {
        self.decide(request)
    }
}

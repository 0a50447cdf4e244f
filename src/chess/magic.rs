use std::{sync::OnceLock, time::Instant};

use crate::{
    chess::{squareset::SquareSet, types::Square},
    rng::XorShiftState,
};

/// Candidate multipliers tried per square before giving up.
const MAX_MAGIC_ATTEMPTS: usize = 100_000_000;

/// The `index`-th subset of `attack_mask`: bit `i` of `index` decides whether
/// the `i`-th lowest square of the mask is occupied.
pub const fn set_occupancy(index: usize, mut attack_mask: SquareSet) -> SquareSet {
    let mut occupancy = SquareSet::EMPTY;

    let mut count = 0;
    while let Some(square) = attack_mask.first() {
        attack_mask = attack_mask.remove_square(square);
        if index & (1 << count) != 0 {
            occupancy = occupancy.add_square(square);
        }
        count += 1;
    }

    occupancy
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    /// (rank, file) steps of the four rays.
    const fn directions(self) -> [(i32, i32); 4] {
        match self {
            Self::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Self::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
        }
    }

    /// Walks every ray out from `square`. Each ray includes the first
    /// blocker it meets and stops there. With `keep_edges` unset, the last
    /// square before leaving the board is dropped.
    #[allow(clippy::cast_sign_loss)]
    const fn cast_rays(self, square: Square, blockers: u64, keep_edges: bool) -> SquareSet {
        let directions = self.directions();
        let limit = if keep_edges { 0 } else { 1 };
        let mut attacks = 0u64;

        cfor!(let mut d = 0; d < 4; d += 1; {
            let (dr, df) = directions[d];
            let mut r = square.rank() as i32 + dr;
            let mut f = square.file() as i32 + df;
            while r + dr * limit >= 0 && r + dr * limit <= 7 && f + df * limit >= 0 && f + df * limit <= 7 {
                let bit = 1 << (r * 8 + f) as u32;
                attacks |= bit;
                if blockers & bit != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        });

        SquareSet::from_inner(attacks)
    }

    /// Squares whose occupancy can change the attacks from `square`. Edge
    /// squares never block anything further along a ray, so they are left out.
    pub const fn mask(self, square: Square) -> SquareSet {
        self.cast_rays(square, 0, false)
    }

    /// Attacks from `square` computed the slow way, by walking each ray.
    pub const fn attacks_on_the_fly(self, square: Square, blockers: SquareSet) -> SquareSet {
        self.cast_rays(square, blockers.inner(), true)
    }
}

/// Per-square lookup parameters. `offset` locates the square's slice of the
/// shared attack table, which has `1 << (64 - shift)` entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: SquareSet,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index(&self, occupied: SquareSet) -> usize {
        let relevant = occupied.inner() & self.mask.inner();
        self.offset + (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Searches for a multiplier that maps every occupancy subset of the square's
/// mask to a slot holding its attack set. Two subsets may share a slot only if
/// they produce the same attacks.
///
/// Returns the magic alongside the attack table it induces.
fn find_magic(square: Square, slider: Slider, rng: &mut XorShiftState) -> (u64, Vec<SquareSet>) {
    let mask = slider.mask(square);
    let relevant_bits = mask.count();
    let variations = 1usize << relevant_bits;
    let shift = 64 - relevant_bits;

    let occupancies = (0..variations)
        .map(|index| set_occupancy(index, mask))
        .collect::<Vec<_>>();
    let attacks = occupancies
        .iter()
        .map(|&occupancy| slider.attacks_on_the_fly(square, occupancy))
        .collect::<Vec<_>>();

    let mut used = vec![SquareSet::EMPTY; variations];

    for _ in 0..MAX_MAGIC_ATTEMPTS {
        let magic = rng.random_few_bits();

        // a good magic spreads the mask into the top byte.
        if (mask.inner().wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(SquareSet::EMPTY);

        let mut fail = false;
        for (&occupancy, &attack) in occupancies.iter().zip(&attacks) {
            #[allow(clippy::cast_possible_truncation)]
            let magic_index = (occupancy.inner().wrapping_mul(magic) >> shift) as usize;

            // slider attack sets are never empty, so EMPTY marks a free slot.
            if used[magic_index] == SquareSet::EMPTY {
                used[magic_index] = attack;
            } else if used[magic_index] != attack {
                fail = true;
                break;
            }
        }

        if !fail {
            return (magic, used);
        }
    }

    panic!("magic number search exhausted {MAX_MAGIC_ATTEMPTS} candidates for {slider:?} on {square}");
}

/// Magic lookup for one slider kind over all 64 squares.
pub struct SliderTable {
    entries: [MagicEntry; 64],
    attacks: Vec<SquareSet>,
}

impl SliderTable {
    fn build(slider: Slider, rng: &mut XorShiftState) -> Self {
        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();

        for square in Square::all() {
            let mask = slider.mask(square);
            let (magic, table) = find_magic(square, slider, rng);
            entries[square] = MagicEntry {
                mask,
                magic,
                shift: 64 - mask.count(),
                offset: attacks.len(),
            };
            attacks.extend_from_slice(&table);
        }

        Self { entries, attacks }
    }

    pub fn attacks(&self, square: Square, occupied: SquareSet) -> SquareSet {
        self.attacks[self.entries[square].index(occupied)]
    }

    /// Total number of attack sets stored.
    fn len(&self) -> usize {
        self.attacks.len()
    }
}

pub struct MagicTables {
    pub bishop: SliderTable,
    pub rook: SliderTable,
}

impl MagicTables {
    fn build() -> Self {
        let mut rng = XorShiftState::new();
        let bishop = SliderTable::build(Slider::Bishop, &mut rng);
        let rook = SliderTable::build(Slider::Rook, &mut rng);
        Self { bishop, rook }
    }
}

static TABLES: OnceLock<MagicTables> = OnceLock::new();

/// Builds the slider tables if they have not been built yet.
/// Calling this at startup keeps the one-time search out of the first
/// move generation call.
pub fn init() -> &'static MagicTables {
    if let Some(tables) = TABLES.get() {
        return tables;
    }
    let start = Instant::now();
    let tables = TABLES.get_or_init(MagicTables::build);
    log::info!(
        "built magic tables in {:.1?} ({} bishop + {} rook entries)",
        start.elapsed(),
        tables.bishop.len(),
        tables.rook.len()
    );
    tables
}

#[inline]
pub fn tables() -> &'static MagicTables {
    TABLES.get_or_init(MagicTables::build)
}

pub fn bishop_attacks(sq: Square, blockers: SquareSet) -> SquareSet {
    tables().bishop.attacks(sq, blockers)
}

pub fn rook_attacks(sq: Square, blockers: SquareSet) -> SquareSet {
    tables().rook.attacks(sq, blockers)
}

pub fn queen_attacks(sq: Square, blockers: SquareSet) -> SquareSet {
    let tables = tables();
    tables.bishop.attacks(sq, blockers) | tables.rook.attacks(sq, blockers)
}

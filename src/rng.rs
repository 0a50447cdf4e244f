const SEED: u128 = 0x246C_CB2D_3B40_2853_9918_0A6D_BC3A_F444;

/// Seeded xorshift generator. Reproducible, not cryptographic.
#[derive(Debug, Clone)]
pub struct XorShiftState {
    pub state: u128,
}

impl XorShiftState {
    pub const fn new() -> Self {
        Self { state: SEED }
    }

    /// Generates the next random number in the sequence, consuming self
    /// This is done to allow for const evaluation.
    pub const fn next_self(mut self) -> (u64, Self) {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        #[allow(clippy::cast_possible_truncation)]
        let r = x as u64; // truncation is the intended behavior here.
        let r = r ^ (x >> 64) as u64; // add in the high bits.
        (r, self)
    }

    /// Generates the next random number in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let (r, next) = self.clone().next_self();
        *self = next;
        r
    }

    /// Generates a random number with only a few bits set.
    /// This will advance the generator by three steps.
    pub fn random_few_bits(&mut self) -> u64 {
        let first = self.next_u64();
        let second = self.next_u64();
        let third = self.next_u64();

        first & second & third
    }
}

impl Default for XorShiftState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::XorShiftState;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShiftState::new();
        let mut b = XorShiftState::new();
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn const_and_mutable_stepping_agree() {
        let mut stepped = XorShiftState::new();
        let mut consumed = XorShiftState::new();
        for _ in 0..100 {
            let r;
            (r, consumed) = consumed.next_self();
            assert_eq!(stepped.next_u64(), r);
        }
    }

    #[test]
    fn few_bits_is_sparse_on_average() {
        let mut rng = XorShiftState::new();
        let total: u32 = (0..1000).map(|_| rng.random_few_bits().count_ones()).sum();
        // three-way AND of uniform words sets an eighth of the bits on average.
        assert!(total / 1000 < 16, "mean popcount was {}", total / 1000);
    }
}

#![allow(clippy::cast_possible_truncation)]

use crate::rng::XorShiftState;

const fn init_hash_keys() -> ([[u64; 64]; 12], [u64; 64], [u64; 4], u64) {
    let mut state = XorShiftState::new();
    let mut piece_keys = [[0; 64]; 12];
    cfor!(let mut index = 0; index < 12; index += 1; {
        cfor!(let mut sq = 0; sq < 64; sq += 1; {
            let key;
            (key, state) = state.next_self();
            piece_keys[index][sq] = key;
        });
    });
    let mut ep_keys = [0; 64];
    cfor!(let mut sq = 0; sq < 64; sq += 1; {
        let key;
        (key, state) = state.next_self();
        ep_keys[sq] = key;
    });
    // one key per right, indexed by bit position in `CastlingRights`.
    let mut castle_keys = [0; 4];
    cfor!(let mut index = 0; index < 4; index += 1; {
        let key;
        (key, state) = state.next_self();
        castle_keys[index] = key;
    });
    let key;
    (key, _) = state.next_self();
    let side_key = key;
    (piece_keys, ep_keys, castle_keys, side_key)
}

const HASH_KEYS: ([[u64; 64]; 12], [u64; 64], [u64; 4], u64) = init_hash_keys();

pub static PIECE_KEYS: [[u64; 64]; 12] = HASH_KEYS.0;
pub static EP_KEYS: [u64; 64] = HASH_KEYS.1;
pub static CASTLE_KEYS: [u64; 4] = HASH_KEYS.2;
pub const SIDE_KEY: u64 = HASH_KEYS.3;

/// XOR of the keys for every right held in `bits`.
pub fn castle_key(bits: u8) -> u64 {
    (0..4)
        .filter(|&i| bits & (1 << i) != 0)
        .fold(0, |acc, i| acc ^ CASTLE_KEYS[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keys_different() {
        let mut hashkeys = PIECE_KEYS.iter().flat_map(|&k| k).collect::<Vec<u64>>();
        hashkeys.extend_from_slice(&EP_KEYS);
        hashkeys.extend_from_slice(&CASTLE_KEYS);
        hashkeys.push(SIDE_KEY);
        hashkeys.sort_unstable();
        let len_before = hashkeys.len();
        hashkeys.dedup();
        assert_eq!(len_before, hashkeys.len());
        assert_eq!(len_before, 12 * 64 + 64 + 4 + 1);
    }

    #[test]
    fn castle_key_composes_by_xor() {
        assert_eq!(castle_key(0), 0);
        assert_eq!(castle_key(0b0001), CASTLE_KEYS[0]);
        assert_eq!(castle_key(0b1010), CASTLE_KEYS[1] ^ CASTLE_KEYS[3]);
        assert_eq!(castle_key(0b1111) ^ castle_key(0b0011), castle_key(0b1100));
    }
}

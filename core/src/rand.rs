// Deterministic pseudo-random generator used by every noise algorithm.
// The whole engine seeds a fresh FastRand per cell from a coordinate hash,
// so re-querying the same cell with the same global seed always reproduces
// the same value without storing any per-cell state.

// Multiplier from the Wang-style integer mix; an odd constant with a good
// avalanche spread over 32 bits.
const MIX_MULTIPLIER: i32 = 0x27d4eb2d;

pub struct FastRand {
    seed: i32,
}

impl FastRand {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    // Advance the seed through a fixed xor-shift / multiply mix and return it.
    // Purely a function of the current seed, nothing else.
    pub fn next_int(&mut self) -> i32 {
        let mut x = self.seed;
        x = (x ^ 61) ^ (((x as u32) >> 16) as i32);
        x = x.wrapping_add(x.wrapping_shl(3));
        x ^= ((x as u32) >> 4) as i32;
        x = x.wrapping_mul(MIX_MULTIPLIER);
        x ^= ((x as u32) >> 15) as i32;
        self.seed = x;
        x
    }

    // Uniform float in [0, 1)
    pub fn next_unit(&mut self) -> f32 {
        (self.next_int().unsigned_abs() % 999_999) as f32 / 999_999.0
    }
}

// Combine a 2D coordinate and a global seed into a per-cell seed.
// A fixed wrapping polynomial over large primes, followed by one shift-xor
// so nearby cells do not land on nearby seeds. The exact bit pattern is not
// a portability promise; determinism for a given build of this function is.
#[inline]
pub fn hash2(x: i32, y: i32, seed: i32) -> i32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374_761_393));
    h = h.wrapping_add(y.wrapping_mul(668_265_263));
    h ^= ((h as u32) >> 13) as i32;
    h
}

// 3D variant of the same mix.
#[inline]
pub fn hash3(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374_761_393));
    h = h.wrapping_add(y.wrapping_mul(668_265_263));
    h = h.wrapping_add(z.wrapping_mul(1_274_126_177));
    h ^= ((h as u32) >> 13) as i32;
    h
}

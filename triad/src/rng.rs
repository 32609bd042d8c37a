use rand::{RngCore, SeedableRng};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-16 code units of `s` (not its UTF-8 bytes).
pub fn fnv1a(s: &str) -> u32 {
    s.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// The mulberry32 generator: a tiny PRNG with 32 bits of state.
///
/// Used for card generation, where every call seeds a fresh generator from
/// a string hash. Not suitable for anything that needs good statistical quality
/// over long sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seeds a generator from the [FNV-1a hash](fnv1a) of a string.
    pub fn from_str_seed(seed: &str) -> Self {
        Self::new(fnv1a(seed))
    }

    /// A uniform float in `[0, 1)` with 32 bits of precision.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Equivalent to `floor(self.next_unit() * n)`, computed without floats.
    pub fn below(&mut self, n: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(n)) >> 32) as u32
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a(""), 0x811c_9dc5);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
        assert_eq!(fnv1a("tt::rudy::SS"), 0x6447_9ac5);
    }

    #[test]
    fn mulberry32_reference_sequence() {
        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
        assert_eq!(rng.next_u32(), 958_946_056);

        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);
    }

    #[test]
    fn below_matches_float_floor() {
        let mut a = Mulberry32::new(7);
        let mut b = a.clone();
        for _ in 0..1000 {
            let expected = (a.next_unit() * 5.0).floor() as u32;
            assert_eq!(b.below(5), expected);
        }
    }

    #[test]
    fn usable_as_rand_rng() {
        let mut rng = Mulberry32::from_seed(42u32.to_le_bytes());
        let mut reference = Mulberry32::new(42);
        assert_eq!(rng.gen::<u32>(), reference.next_u32());
        for _ in 0..100 {
            let x: u8 = rng.gen_range(1..=9);
            assert!((1..=9).contains(&x));
        }
        let mut bytes = [0u8; 6];
        rng.fill_bytes(&mut bytes);
    }
}

/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Small seeded generator used for the initial body tilt.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Zero is a fixed point of xorshift, so it is remapped.
    pub fn new(seed: u32) -> Self {
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    /// Seed from the browser's `Math.random` when available.
    pub fn from_entropy(fallback: u32) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
            Self::new(seed ^ fallback)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(fallback)
        }
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        xorshift32(&mut self.state) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform in [-half_range, half_range)
    pub fn symmetric(&mut self, half_range: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * half_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_stays_in_range() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            let v = rng.symmetric(0.025);
            assert!(v >= -0.025 && v < 0.025);
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = Rng::new(0);
        let a = rng.next_f64();
        let b = rng.next_f64();
        assert_ne!(a, b);
    }
}

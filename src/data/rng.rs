//! Seeded random source behind `folio generate`: a given seed always writes the
//! same dataset, so generated files can be reproduced from the seed the CLI
//! prints. SplitMix64 underneath; not for anything security related.

const STATE_INCREMENT: u64 = 0x9e3779b97f4a7c15;
const MIX_FIRST: u64 = 0xbf58476d1ce4e5b9;
const MIX_SECOND: u64 = 0x94d049bb133111eb;

#[derive(Debug, Clone, Copy)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mixed = (self.state ^ (self.state >> 30)).wrapping_mul(MIX_FIRST);
        let mixed = (mixed ^ (mixed >> 27)).wrapping_mul(MIX_SECOND);
        mixed ^ (mixed >> 31)
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    pub fn next_unit(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, high)`; used for generated costs and percentages.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Index into a non-empty slice of length `len`; picks id characters.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_bits() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_zero_matches_reference_splitmix_output() {
        let mut rng = SeededRng::from_seed(0);
        assert_eq!(rng.next_bits(), 0xe220a8397b1dcdaf);
    }

    #[test]
    fn printed_seed_reproduces_the_draws() {
        let draw = |seed| {
            let mut rng = SeededRng::from_seed(seed);
            (0..20).map(|_| rng.uniform(1.0, 1000.0)).collect::<Vec<_>>()
        };
        assert_eq!(draw(1_700_000_000), draw(1_700_000_000));
        assert_ne!(draw(1), draw(2));
    }

    #[test]
    fn id_character_picks_stay_in_bounds() {
        let mut rng = SeededRng::from_seed(42);
        let mut seen = [false; 26];
        for _ in 0..2000 {
            let pick = rng.index(26);
            assert!(pick < 26);
            seen[pick] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "every letter should come up");
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn cost_draws_stay_in_range() {
        let mut rng = SeededRng::from_seed(7);
        for _ in 0..1000 {
            let cost = rng.uniform(1.0, 1000.0);
            assert!((1.0..1000.0).contains(&cost));
            assert!((0.0..1.0).contains(&rng.next_unit()));
        }
    }
}

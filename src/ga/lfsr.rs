//! Deterministic pseudo-random bit source.
//!
//! A 32-bit Fibonacci LFSR with taps at bits 31, 21, 1 and 0. Every stochastic
//! decision of the engine (seeding, tournament draws, crossover gating,
//! mutation sites, diversity injection) is derived from this one stream, so a
//! run is fully determined by its seed.
//!
//! Operators read multi-bit values from the *word view*: [`Lfsr::step`]
//! advances the register once and returns the whole 32-bit state, from which
//! individual bit positions are extracted with [`bit_at`].
//!
//! [`Lfsr`] also implements [`rand::RngCore`] and [`rand::SeedableRng`], so
//! the same stream can drive `rand` APIs. Those adapters draw one bit per
//! step and are not used by the engine's operators.

use rand::{RngCore, SeedableRng};

/// State substituted for a zero seed, which would lock the register at zero.
pub const ZERO_SEED_STATE: u32 = 0xB4BC_D35C;

/// Tap positions XOR-ed into the feedback bit.
const TAPS: [u32; 4] = [31, 21, 1, 0];

/// Linear-feedback shift register.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::Lfsr;
///
/// let mut a = Lfsr::new(42);
/// let mut b = Lfsr::new(42);
/// for _ in 0..100 {
///     assert_eq!(a.next_bit(), b.next_bit());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lfsr {
    state: u32,
}

impl Lfsr {
    /// Creates a register loaded with `seed`.
    ///
    /// A zero seed is replaced by [`ZERO_SEED_STATE`].
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_STATE } else { seed };
        Self { state }
    }

    /// Current register contents.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Shifts the register left by one, inserting the feedback bit at
    /// position 0, and returns the new word.
    #[inline]
    pub fn step(&mut self) -> u32 {
        let feedback = TAPS
            .iter()
            .fold(0u32, |acc, &tap| acc ^ ((self.state >> tap) & 1));
        self.state = (self.state << 1) | feedback;
        self.state
    }

    /// Advances once and returns the new least significant bit.
    #[inline]
    pub fn next_bit(&mut self) -> bool {
        self.step() & 1 == 1
    }
}

/// Extracts bit `pos` (taken modulo 32) of `word`.
#[inline]
pub fn bit_at(word: u32, pos: usize) -> bool {
    (word >> (pos % 32)) & 1 == 1
}

impl RngCore for Lfsr {
    fn next_u32(&mut self) -> u32 {
        (0..32).fold(0u32, |acc, _| (acc << 1) | u32::from(self.next_bit()))
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lfsr {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_step_inserts_feedback_at_lsb() {
        // Only bit 0 set: taps 31, 21, 1 are clear, so feedback = 1.
        let mut rng = Lfsr::new(1);
        assert_eq!(rng.step(), 0b11);
        // bits 0 and 1 set: feedback = 1 ^ 1 = 0.
        assert_eq!(rng.step(), 0b110);
        // only bit 1 set among taps: feedback = 1.
        assert_eq!(rng.step(), 0b1101);
    }

    #[test]
    fn test_msb_is_shifted_out() {
        let mut rng = Lfsr::new(0x8000_0000);
        // bit 31 is a tap, so feedback = 1 while the MSB falls off.
        assert_eq!(rng.step(), 1);
    }

    #[test]
    fn test_tap_21_contributes() {
        let mut rng = Lfsr::new(1 << 21);
        assert_eq!(rng.step(), (1 << 22) | 1);
    }

    #[test]
    fn test_zero_seed_is_replaced() {
        let rng = Lfsr::new(0);
        assert_eq!(rng.state(), ZERO_SEED_STATE);
        let mut rng = Lfsr::new(0);
        assert_ne!(rng.step(), 0);
    }

    #[test]
    fn test_next_bit_matches_new_lsb() {
        let mut a = Lfsr::new(0xDEAD_BEEF);
        let mut b = a;
        for _ in 0..256 {
            let word = a.step();
            assert_eq!(b.next_bit(), word & 1 == 1);
        }
    }

    #[test]
    fn test_stream_does_not_collapse() {
        let mut rng = Lfsr::new(42);
        let ones = (0..10_000).filter(|_| rng.next_bit()).count();
        assert!(
            (4_000..6_000).contains(&ones),
            "expected a roughly balanced bit stream, got {ones} ones"
        );
    }

    #[test]
    fn test_bit_at_wraps_position() {
        assert!(bit_at(1, 0));
        assert!(bit_at(1, 32));
        assert!(bit_at(0x8000_0000, 63));
        assert!(!bit_at(0x8000_0000, 30));
    }

    #[test]
    fn test_rand_adapter_is_deterministic() {
        let mut a = Lfsr::from_seed(42u32.to_le_bytes());
        let mut b = Lfsr::new(42);
        let xs: Vec<u32> = (0..16).map(|_| a.random_range(0..1000)).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.random_range(0..1000)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 1000));
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut rng = Lfsr::new(7);
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }
}

//! Seed-driven random stream.
//!
//! Every pixel gets its own [`Seed`] hashed from its linear index and the
//! frame index, so any (pixel, frame) pair replays bit-identically. The stream
//! itself is a 32-bit LCG; it is cheap enough to carry in every path state.

use rand::RngCore;

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

/// Mutable generator state for one pixel's sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(u32);

impl Seed {
    /// Wrap a raw state value.
    pub fn new(state: u32) -> Self {
        Self(state)
    }

    /// Seed for `pixel_index` (`y * width + x`) in frame `frame_index`.
    pub fn for_pixel(pixel_index: u32, frame_index: u32) -> Self {
        Self(tea(pixel_index, frame_index))
    }

    /// Current raw state.
    pub fn state(&self) -> u32 {
        self.0
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.0
    }

    /// Uniform scalar in `[0, 1)`.
    ///
    /// Uses the top 24 bits of the LCG output; the low bits of a
    /// power-of-two LCG have short periods.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.step() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform scalar in `[-1, 1)`.
    #[inline]
    pub fn next_signed(&mut self) -> f32 {
        2.0 * self.next_f32() - 1.0
    }
}

impl RngCore for Seed {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.step());
        let high = u64::from(self.step());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Tiny Encryption Algorithm, 4 rounds. Scrambles two words into one well
/// mixed seed.
fn tea(val0: u32, val1: u32) -> u32 {
    let mut v0 = val0;
    let mut v1 = val1;
    let mut sum = 0u32;

    for _ in 0..4 {
        sum = sum.wrapping_add(0x9e37_79b9);
        v0 = v0.wrapping_add(
            (v1 << 4).wrapping_add(0xa341_316c)
                ^ v1.wrapping_add(sum)
                ^ (v1 >> 5).wrapping_add(0xc801_3ea4),
        );
        v1 = v1.wrapping_add(
            (v0 << 4).wrapping_add(0xad90_777d)
                ^ v0.wrapping_add(sum)
                ^ (v0 >> 5).wrapping_add(0x7e95_761e),
        );
    }

    v0
}

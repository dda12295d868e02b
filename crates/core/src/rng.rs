//! Seeded pseudo-random stream used by world generation and monster turns.
//!
//! Multiply-with-carry generator over a 4096-word lag table, filled from the
//! seed with a linear congruential pass. Every draw the simulation makes goes
//! through one `RngState`, so a seed fully determines a run.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const TABLE_WORDS: usize = 4096;
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const MWC_MULTIPLIER: u64 = 18_782;

pub struct RngState {
    table: Box<[u32; TABLE_WORDS]>,
    counter: usize,
    seed: u32,
}

impl RngState {
    /// An unseeded state. Call [`set_seed`](Self::set_seed) and
    /// [`init`](Self::init) before drawing, or use [`from_seed`](Self::from_seed).
    pub fn new() -> Self {
        Self {
            table: Box::new([0; TABLE_WORDS]),
            counter: TABLE_WORDS - 1,
            seed: 0,
        }
    }

    pub fn from_seed(seed: u32) -> Self {
        let mut rng = Self::new();
        rng.set_seed(seed);
        rng.init();
        rng
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    /// The running carry word. Right after `init` this is still the seed the
    /// table was filled from; it mutates with every draw.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Fill the lag table. A zero seed is replaced with process entropy, which
    /// is the one nondeterministic path in the crate.
    pub fn init(&mut self) {
        if self.seed == 0 {
            self.seed = entropy_seed();
        }
        let mut value = self.seed;
        for slot in self.table.iter_mut() {
            *slot = value;
            value = value.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.counter = (self.counter + 1) & (TABLE_WORDS - 1);
        let t = MWC_MULTIPLIER * u64::from(self.table[self.counter]) + u64::from(self.seed);
        self.seed = (t >> 32) as u32;
        let mut x = (t as u32).wrapping_add(self.seed);
        if x < self.seed {
            x = x.wrapping_add(1);
            self.seed = self.seed.wrapping_add(1);
        }
        self.table[self.counter] = 0xffff_fffe_u32.wrapping_sub(x);
        self.table[self.counter]
    }

    /// Uniform draw in `0..bound`, rejection-sampled so no residue class is
    /// favored. `bound < 2` returns 0 without consuming a draw.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        if bound < 2 {
            return 0;
        }
        let min = bound.wrapping_neg() % bound;
        loop {
            let draw = self.next_u32();
            if draw >= min {
                return draw % bound;
            }
        }
    }
}

impl Default for RngState {
    fn default() -> Self {
        Self::new()
    }
}

static ENTROPY_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Nonzero fallback seed mixed from wall clock, pid, and a process-local
/// counter, so two states seeded in the same nanosecond still differ.
fn entropy_seed() -> u32 {
    let now_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0u128, |elapsed| elapsed.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = u64::from(ENTROPY_COUNTER.fetch_add(1, Ordering::Relaxed));

    let raw = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(41);
    let mixed = avalanche(raw);
    let folded = (mixed ^ (mixed >> 32)) as u32;
    if folded == 0 { 1 } else { folded }
}

fn avalanche(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51_afd7_ed55_8ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    value ^= value >> 33;
    value
}

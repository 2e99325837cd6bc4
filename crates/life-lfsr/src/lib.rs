//! Galois LFSR used as a step sequencer.
//!
//! LFSRs stand in for counters everywhere an address or position advances
//! every cycle. Incrementing an n-bit counter is O(n) work because of carry
//! propagation; stepping an n-bit Galois LFSR is O(1). The price is that the
//! values visited are not ordered — equality against a precomputed value is
//! the only meaningful comparison, and even that is kept off the per-step
//! path by registering the compare one step early (see [`Lfsr::watch`]).
//!
//! A sequencer configured for a cycle length that is not `2^n - 1` cannot
//! roll over naturally. Instead it carries an internal registered flag that
//! goes high one step before the end of the cycle and forces a restart on
//! the following step, so no wide comparison ever sits on the critical path.

/// First feedback polynomial for each LFSR size from
/// <http://users.ece.cmu.edu/~koopman/lfsr/index.html>, indexed from
/// [`MIN_BITS`] bits.
const POLYNOMIALS: [u32; 29] = [
    0x9,
    0x12,
    0x21,
    0x41,
    0x8E,
    0x108,
    0x204,
    0x402,
    0x829,
    0x100D,
    0x2015,
    0x4001,
    0x8016,
    0x1_0004,
    0x2_0013,
    0x4_0013,
    0x8_0004,
    0x10_0002,
    0x20_0001,
    0x40_0010,
    0x80_000D,
    0x100_0004,
    0x200_0023,
    0x400_0013,
    0x800_0004,
    0x1000_0002,
    0x2000_0029,
    0x4000_0004,
    0x8000_0057,
];

/// Smallest supported register width. Shorter cycles run on a 4-bit LFSR.
pub const MIN_BITS: u32 = 4;
/// Largest supported register width.
pub const MAX_BITS: u32 = 32;

/// Bits needed to represent `n` (`bits_for(5) == 3`).
const fn bits_for(n: u32) -> u32 {
    32 - n.leading_zeros()
}

/// Parameters of an [`Lfsr`]: cycle length, register width, feedback
/// polynomial and restart value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfsrConfig {
    num_steps: u32,
    num_bits: u32,
    polynomial: u32,
    restart_value: u32,
}

impl LfsrConfig {
    /// Maximal-length configuration: `2^n - 1` steps on an `n`-bit register.
    #[must_use]
    pub fn num_bits(n: u32) -> Self {
        assert!(n >= 2 && n <= MAX_BITS, "unsupported LFSR width");
        Self::with_seed(if n == 32 { u32::MAX } else { (1 << n) - 1 }, 1)
    }

    /// Configuration with exactly `n` steps before repeating.
    #[must_use]
    pub fn num_steps(n: u32) -> Self {
        Self::with_seed(n, 1)
    }

    /// Configuration with `n` steps starting from a caller-chosen seed.
    /// The seed is normalised into `1..=n` so the register never holds the
    /// all-zero lockup state.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2` or the cycle needs a register wider than
    /// [`MAX_BITS`].
    #[must_use]
    pub fn with_seed(n: u32, seed: u32) -> Self {
        assert!(n >= 2, "cycle length must be at least 2");
        let num_bits = bits_for(n).max(MIN_BITS);
        assert!(num_bits <= MAX_BITS, "cycle length needs too wide a register");
        let seed = if seed == 0 { 1 } else { seed };
        Self {
            num_steps: n,
            num_bits,
            polynomial: POLYNOMIALS[(num_bits - MIN_BITS) as usize],
            restart_value: ((seed - 1) % n) + 1,
        }
    }

    /// Cycle length.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.num_steps
    }

    /// Register width in bits.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.num_bits
    }

    #[must_use]
    pub const fn restart_value(&self) -> u32 {
        self.restart_value
    }

    /// A maximal-length configuration rolls over naturally; anything shorter
    /// needs the registered restart.
    #[must_use]
    pub const fn is_maximal(&self) -> bool {
        if self.num_bits == 32 {
            self.num_steps == u32::MAX
        } else {
            self.num_steps == (1 << self.num_bits) - 1
        }
    }

    /// One Galois step.
    const fn advance(&self, value: u32) -> u32 {
        if value & 1 == 0 {
            value >> 1
        } else {
            (value >> 1) ^ self.polynomial
        }
    }

    /// Register value at the given step of the cycle. O(step); used only at
    /// construction time to precompute watcher match values.
    #[must_use]
    pub fn value_at(&self, step: u32) -> u32 {
        let step = step % self.num_steps;
        let mut v = self.restart_value;
        for _ in 0..step {
            v = self.advance(v);
        }
        v
    }
}

/// A registered comparison against one step of the cycle.
///
/// Matching a wide value is relatively slow, so the watch compares against
/// the value one step *before* the target and registers the result; the flag
/// then reads true during exactly the step where the sequencer sits on the
/// target.
#[derive(Debug)]
struct Watch {
    target: u32,
    match_value: u32,
    matched: bool,
}

/// Handle to a watch registered with [`Lfsr::watch`].
#[derive(Debug, Clone, Copy)]
pub struct WatchId(usize);

/// Galois LFSR step sequencer.
///
/// `tick(enable)` is one clock edge: a pending restart always wins, otherwise
/// the register advances when enabled and holds when not. `step()` is
/// shorthand for an always-enabled edge.
#[derive(Debug)]
pub struct Lfsr {
    config: LfsrConfig,
    value: u32,
    restart_pending: bool,
    /// Registered "one step before end of cycle" flag (non-maximal only).
    at_wrap: bool,
    wrap_match: u32,
    watches: Vec<Watch>,
}

impl Lfsr {
    #[must_use]
    pub fn new(config: LfsrConfig) -> Self {
        let n = config.steps();
        Self {
            config,
            value: config.restart_value(),
            restart_pending: false,
            at_wrap: false,
            wrap_match: config.value_at(n.wrapping_sub(2) % n),
            watches: Vec::new(),
        }
    }

    /// Maximal-length sequencer with an `n`-bit register.
    #[must_use]
    pub fn num_bits(n: u32) -> Self {
        Self::new(LfsrConfig::num_bits(n))
    }

    /// Sequencer with exactly `n` steps before repeating.
    #[must_use]
    pub fn num_steps(n: u32) -> Self {
        Self::new(LfsrConfig::num_steps(n))
    }

    #[must_use]
    pub const fn config(&self) -> &LfsrConfig {
        &self.config
    }

    /// Current register value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Force the restart value on the next tick, overriding a pending step.
    pub fn restart(&mut self) {
        self.restart_pending = true;
    }

    /// Register a watch that reads true during exactly the tick where the
    /// sequencer sits on `target_step` of its cycle. The comparison value is
    /// precomputed here; nothing wide is compared per step.
    pub fn watch(&mut self, target_step: u32) -> WatchId {
        let n = self.config.steps();
        let target = target_step % n;
        self.watches.push(Watch {
            target,
            match_value: self.config.value_at((target + n - 1) % n),
            // The register starts at step 0, so a watch on step 0 is
            // already matching.
            matched: target == 0,
        });
        WatchId(self.watches.len() - 1)
    }

    /// Whether the watched step is the current one.
    #[must_use]
    pub fn at_target(&self, id: WatchId) -> bool {
        self.watches[id.0].matched
    }

    /// One clock edge. A pending restart applies whether or not `enable` is
    /// set; otherwise the register advances only when enabled.
    pub fn tick(&mut self, enable: bool) {
        if self.restart_pending {
            self.restart_pending = false;
            self.value = self.config.restart_value();
            self.at_wrap = false;
            for w in &mut self.watches {
                w.matched = w.target == 0;
            }
        } else if enable {
            let prev = self.value;
            self.value = if !self.config.is_maximal() && self.at_wrap {
                self.config.restart_value()
            } else {
                self.config.advance(prev)
            };
            self.at_wrap = prev == self.wrap_match;
            for w in &mut self.watches {
                w.matched = prev == w.match_value;
            }
        }
    }

    /// Advance one step.
    pub fn step(&mut self) {
        self.tick(true);
    }
}

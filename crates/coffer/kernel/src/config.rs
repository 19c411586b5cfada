/// Default skim allowance: 50 bps (0.5%) of accrued yield.
pub const DEFAULT_SKIM_BPS: u16 = 50;

/// Tunable kernel parameters, fixed at bring-up.
///
/// The skim bound is the only policy the kernel itself enforces; shift-size
/// maxima, retry, and cooldown policy belong to the external agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelConfig {
    /// Fraction of accrued yield (in basis points) an Operator may skim in
    /// one call. Skims draw strictly from surplus, never principal, so this
    /// bounds the drain rate of even a compromised Operator.
    pub skim_bps: u16,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            skim_bps: DEFAULT_SKIM_BPS,
        }
    }
}

impl KernelConfig {
    /// Maximum skimmable amount for a given yield, floored.
    pub fn skim_cap_minor(&self, yield_minor: u64) -> u64 {
        (yield_minor as u128 * self.skim_bps as u128 / 10_000) as u64
    }
}

//! 1-indexed modular hole arithmetic.
//!
//! Rim holes live on a ring of `N` positions and each hub flange on a ring
//! of `H`. Hole `N` sits next to hole `1`; every index computed by the
//! generator is folded back onto `1..=size` here.

use crate::error::GenerationFault;

/// A ring of `size` holes numbered `1..=size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ring {
    name: &'static str,
    size: u32,
}

impl Ring {
    /// Ring of rim holes.
    pub const fn rim(holes: u32) -> Self {
        Self {
            name: "rim",
            size: holes,
        }
    }

    /// Ring of holes on one hub flange.
    pub const fn hub(flange_holes: u32) -> Self {
        Self {
            name: "hub",
            size: flange_holes,
        }
    }

    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Fold any integer onto `1..=size`.
    ///
    /// `wrap(0) == size`, `wrap(size + 1) == 1`.
    #[inline]
    pub fn wrap(&self, index: i64) -> u32 {
        let size = i64::from(self.size);
        ((index - 1).rem_euclid(size) + 1) as u32
    }

    /// The hole `steps` positions away from `from` (negative walks backwards).
    #[inline]
    pub fn offset(&self, from: u32, steps: i64) -> u32 {
        self.wrap(i64::from(from) + steps)
    }

    /// Accept `index` only if it already lies in `1..=size`.
    pub fn check(&self, index: i64) -> Result<u32, GenerationFault> {
        if index < 1 || index > i64::from(self.size) {
            return Err(GenerationFault::OutOfRange {
                ring: self.name,
                index,
                size: self.size,
            });
        }
        Ok(index as u32)
    }
}

/// Occupancy of one ring while a pattern is being laid out.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    ring: Ring,
    taken: Vec<bool>,
}

impl Ledger {
    pub(crate) fn new(ring: Ring) -> Self {
        Self {
            ring,
            taken: vec![false; ring.size() as usize],
        }
    }

    #[cfg(test)]
    pub(crate) fn is_taken(&self, hole: u32) -> bool {
        (hole as usize)
            .checked_sub(1)
            .and_then(|i| self.taken.get(i))
            .copied()
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn free(&self) -> usize {
        self.taken.iter().filter(|taken| !**taken).count()
    }

    /// Claim `target`, or the first free hole after it walking in `direction`.
    ///
    /// A target is only ever taken at the wrap seam of a ring whose lanes do
    /// not tile evenly; everywhere else the first claim succeeds.
    pub(crate) fn claim_nearest(&mut self, target: u32, direction: i64) -> Result<u32, GenerationFault> {
        let start = self.ring.check(i64::from(target))?;
        let step = if direction < 0 { -1 } else { 1 };

        for attempt in 0..i64::from(self.ring.size()) {
            let hole = self.ring.offset(start, attempt * step);
            let slot = &mut self.taken[hole as usize - 1];
            if !*slot {
                *slot = true;
                return Ok(hole);
            }
        }

        Err(GenerationFault::LedgerExhausted {
            ring: self.ring.name(),
            size: self.ring.size(),
        })
    }
}

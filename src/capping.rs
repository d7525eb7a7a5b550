use crate::zones::ZonePair;

/// Running total for one cap scope (a day or a week).
///
/// Built fresh for every scope; nothing carries over between scopes or
/// between calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapAccumulator {
    pub cap: u32,
    pub total: u32,
    pub cap_reached: bool,
}

impl CapAccumulator {
    pub fn new(cap: u32) -> Self {
        CapAccumulator {
            cap,
            total: 0,
            cap_reached: false,
        }
    }

    /// Charges `raw` against the cap and returns the amount actually charged.
    ///
    /// Checked in order: crossing the cap charges the remaining headroom,
    /// landing exactly on it charges nothing, and once reached anything that
    /// stays under the cap is free.
    ///
    /// An exact hit charges 0 without consuming headroom, so a later fare that
    /// would cross the cap is still charged what is left.
    pub fn charge(&mut self, raw: u32) -> u32 {
        let running = self.total.saturating_add(raw);
        let charged = if running > self.cap {
            self.cap_reached = true;
            self.cap.saturating_sub(self.total)
        } else if running == self.cap {
            self.cap_reached = true;
            0
        } else if self.cap_reached {
            0
        } else {
            raw
        };
        self.total += charged;
        charged
    }

    pub fn headroom(&self) -> u32 {
        self.cap.saturating_sub(self.total)
    }
}

/// Picks the zone pair whose cap governs a day or a week.
///
/// The last cross-zone pair wins, except that a later same-zone pair inside
/// `inner_zone` overrides it. Other same-zone pairs never override. With no
/// qualifying pair the result is `fallback`.
pub fn dominant_zone_pair<I>(pairs: I, inner_zone: i32, fallback: ZonePair) -> ZonePair
where
    I: IntoIterator<Item = ZonePair>,
{
    let mut dominant = fallback;
    for pair in pairs {
        if pair.is_cross_zone() || pair.0 == inner_zone {
            dominant = pair;
        }
    }
    dominant
}

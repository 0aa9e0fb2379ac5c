//! Ordered threshold tables shared by the soil scorers.
//!
//! Each parameter is described by a list of bands checked top to bottom; the
//! first band with an interval containing the reading wins, and readings
//! outside every band fall through to the table's fallback value.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
    lo_inclusive: bool,
    hi_inclusive: bool,
}

impl Interval {
    /// `[lo, hi]`
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            lo_inclusive: true,
            hi_inclusive: true,
        }
    }

    /// `[lo, hi)`
    pub const fn closed_open(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            lo_inclusive: true,
            hi_inclusive: false,
        }
    }

    /// `(lo, hi]`
    pub const fn open_closed(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            lo_inclusive: false,
            hi_inclusive: true,
        }
    }

    /// `[lo, +inf)`
    pub const fn at_least(lo: f64) -> Self {
        Self {
            lo,
            hi: f64::INFINITY,
            lo_inclusive: true,
            hi_inclusive: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = if self.lo_inclusive {
            value >= self.lo
        } else {
            value > self.lo
        };
        let below = if self.hi_inclusive {
            value <= self.hi
        } else {
            value < self.hi
        };
        above && below
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Band<T: 'static> {
    pub intervals: &'static [Interval],
    pub value: T,
}

#[derive(Debug, Clone, Copy)]
pub struct BandTable<T: 'static> {
    pub bands: &'static [Band<T>],
    pub fallback: T,
}

impl<T: Copy> BandTable<T> {
    pub fn lookup(&self, reading: f64) -> T {
        self.bands
            .iter()
            .find(|band| band.intervals.iter().any(|i| i.contains(reading)))
            .map_or(self.fallback, |band| band.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: BandTable<u8> = BandTable {
        bands: &[
            Band {
                intervals: &[Interval::closed(6.0, 7.0)],
                value: 3,
            },
            Band {
                intervals: &[Interval::closed_open(5.0, 6.0), Interval::open_closed(7.0, 8.0)],
                value: 2,
            },
        ],
        fallback: 1,
    };

    #[test]
    fn interval_edges() {
        assert!(Interval::closed(1.0, 2.0).contains(1.0));
        assert!(Interval::closed(1.0, 2.0).contains(2.0));
        assert!(!Interval::closed_open(1.0, 2.0).contains(2.0));
        assert!(!Interval::open_closed(1.0, 2.0).contains(1.0));
        assert!(Interval::at_least(5.0).contains(1e9));
        assert!(!Interval::at_least(5.0).contains(4.999));
    }

    #[test]
    fn first_matching_band_wins() {
        assert_eq!(TABLE.lookup(6.0), 3);
        assert_eq!(TABLE.lookup(7.0), 3);
        assert_eq!(TABLE.lookup(5.5), 2);
        assert_eq!(TABLE.lookup(7.01), 2);
        assert_eq!(TABLE.lookup(8.0), 2);
    }

    #[test]
    fn unmatched_reading_uses_fallback() {
        assert_eq!(TABLE.lookup(4.0), 1);
        assert_eq!(TABLE.lookup(9.0), 1);
        assert_eq!(TABLE.lookup(f64::NAN), 1);
    }
}

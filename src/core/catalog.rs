use crate::models::{Dimension, SizeLabel};

/// Inclusive measurement range for one dimension of a size band (cm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn half_range(&self) -> f64 {
        (self.max - self.min) / 2.0
    }
}

/// Per-dimension ranges of a size band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRanges {
    pub bust: Range,
    pub waist: Range,
    pub hip: Range,
}

impl BandRanges {
    pub fn get(&self, dimension: Dimension) -> Range {
        match dimension {
            Dimension::Bust => self.bust,
            Dimension::Waist => self.waist,
            Dimension::Hip => self.hip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBand {
    pub label: SizeLabel,
    pub ranges: BandRanges,
}

const BANDS: [SizeBand; 5] = [
    SizeBand {
        label: SizeLabel::XS,
        ranges: BandRanges {
            bust: Range::new(76.0, 83.0),
            waist: Range::new(58.0, 65.0),
            hip: Range::new(84.0, 91.0),
        },
    },
    SizeBand {
        label: SizeLabel::S,
        ranges: BandRanges {
            bust: Range::new(84.0, 91.0),
            waist: Range::new(66.0, 73.0),
            hip: Range::new(92.0, 99.0),
        },
    },
    SizeBand {
        label: SizeLabel::M,
        ranges: BandRanges {
            bust: Range::new(92.0, 99.0),
            waist: Range::new(74.0, 81.0),
            hip: Range::new(100.0, 107.0),
        },
    },
    SizeBand {
        label: SizeLabel::L,
        ranges: BandRanges {
            bust: Range::new(100.0, 107.0),
            waist: Range::new(82.0, 89.0),
            hip: Range::new(108.0, 115.0),
        },
    },
    SizeBand {
        label: SizeLabel::XL,
        ranges: BandRanges {
            bust: Range::new(108.0, 115.0),
            waist: Range::new(90.0, 97.0),
            hip: Range::new(116.0, 123.0),
        },
    },
];

/// Static size chart. Band order is the catalog order used for tie-breaking
/// and neighbor lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeCatalog;

impl SizeCatalog {
    pub fn bands(&self) -> &'static [SizeBand] {
        &BANDS
    }

    pub fn ordered_sizes(&self) -> [SizeLabel; 5] {
        SizeLabel::ALL
    }

    pub fn lookup(&self, size: SizeLabel) -> BandRanges {
        BANDS[self.position(size)].ranges
    }

    /// Zero-based catalog position of a size
    pub fn position(&self, size: SizeLabel) -> usize {
        size as usize
    }

    pub fn smaller(&self, size: SizeLabel) -> Option<SizeLabel> {
        self.position(size)
            .checked_sub(1)
            .map(|idx| BANDS[idx].label)
    }

    pub fn larger(&self, size: SizeLabel) -> Option<SizeLabel> {
        BANDS.get(self.position(size) + 1).map(|band| band.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_labels() {
        let catalog = SizeCatalog;
        for (idx, band) in catalog.bands().iter().enumerate() {
            assert_eq!(catalog.position(band.label), idx);
            assert_eq!(catalog.ordered_sizes()[idx], band.label);
        }
    }

    #[test]
    fn test_lookup_medium() {
        let m = SizeCatalog.lookup(SizeLabel::M);
        assert_eq!(m.bust, Range::new(92.0, 99.0));
        assert_eq!(m.waist.midpoint(), 77.5);
        assert_eq!(m.hip.half_range(), 3.5);
    }

    #[test]
    fn test_neighbors() {
        let catalog = SizeCatalog;
        assert_eq!(catalog.smaller(SizeLabel::XS), None);
        assert_eq!(catalog.larger(SizeLabel::XS), Some(SizeLabel::S));
        assert_eq!(catalog.smaller(SizeLabel::XL), Some(SizeLabel::L));
        assert_eq!(catalog.larger(SizeLabel::XL), None);
    }
}

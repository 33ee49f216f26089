pub mod resolve;

pub use resolve::{resolve, resolve_range, Segment};

/// A single contiguous coordinate span, 1-based inclusive.
///
/// `Local` spans live in the owning record, `Remote` spans in another record
/// identified by accession (+ optional version), `Gap` is an unsequenced
/// stretch of known or unknown length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Range {
    Local {
        begin: u64,
        end: u64,
        complement: bool,
    },
    Remote {
        accession: Box<str>,
        version: Option<u32>,
        begin: u64,
        end: u64,
        complement: bool,
    },
    Gap {
        length: Option<u64>,
    },
}

impl Range {
    pub fn local(begin: u64, end: u64) -> Self {
        Range::Local {
            begin,
            end,
            complement: false,
        }
    }

    pub fn local_complement(begin: u64, end: u64) -> Self {
        Range::Local {
            begin,
            end,
            complement: true,
        }
    }

    pub fn remote(accession: impl Into<Box<str>>, version: Option<u32>, begin: u64, end: u64) -> Self {
        let accession = accession.into();
        debug_assert!(!accession.is_empty());
        Range::Remote {
            accession,
            version,
            begin,
            end,
            complement: false,
        }
    }

    pub fn gap(length: Option<u64>) -> Self {
        Range::Gap { length }
    }

    pub fn with_complement(mut self, value: bool) -> Self {
        match &mut self {
            Range::Local { complement, .. } | Range::Remote { complement, .. } => {
                *complement = value;
            }
            Range::Gap { .. } => {}
        }
        self
    }

    pub fn begin(&self) -> Option<u64> {
        match self {
            Range::Local { begin, .. } | Range::Remote { begin, .. } => Some(*begin),
            Range::Gap { .. } => None,
        }
    }

    pub fn end(&self) -> Option<u64> {
        match self {
            Range::Local { end, .. } | Range::Remote { end, .. } => Some(*end),
            Range::Gap { .. } => None,
        }
    }

    /// Number of bases this range denotes, when known.
    pub fn span(&self) -> Option<u64> {
        match self {
            Range::Local { begin, end, .. } | Range::Remote { begin, end, .. } => {
                Some(end.saturating_sub(*begin) + 1)
            }
            Range::Gap { length } => *length,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Range::Remote { .. })
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Range::Gap { .. })
    }

    pub fn complement(&self) -> bool {
        match self {
            Range::Local { complement, .. } | Range::Remote { complement, .. } => *complement,
            Range::Gap { .. } => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    /// Members concatenate in listed order into one contiguous molecule.
    Join,
    /// Members form a set with no implied adjacency.
    Order,
}

/// An ordered collection of ranges with whole-location flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundLocation {
    ranges: Vec<Range>,
    kind: LocationKind,
    global_complement: bool,
    left_partial: bool,
    right_partial: bool,
    simple: bool,
}

impl CompoundLocation {
    pub fn single(range: Range) -> Self {
        Self {
            ranges: vec![range],
            kind: LocationKind::Join,
            global_complement: false,
            left_partial: false,
            right_partial: false,
            simple: true,
        }
    }

    pub fn join(ranges: Vec<Range>) -> Self {
        let simple = ranges.len() == 1;
        Self {
            ranges,
            kind: LocationKind::Join,
            global_complement: false,
            left_partial: false,
            right_partial: false,
            simple,
        }
    }

    pub fn order(ranges: Vec<Range>) -> Self {
        Self {
            ranges,
            kind: LocationKind::Order,
            global_complement: false,
            left_partial: false,
            right_partial: false,
            simple: false,
        }
    }

    pub fn with_complement(mut self) -> Self {
        self.global_complement = true;
        self
    }

    pub fn with_left_partial(mut self) -> Self {
        self.left_partial = true;
        self
    }

    pub fn with_right_partial(mut self) -> Self {
        self.right_partial = true;
        self
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Whole-location complement flag; per-range complement only matters
    /// when resolving bases.
    pub fn is_complement(&self) -> bool {
        self.global_complement
    }

    pub fn is_left_partial(&self) -> bool {
        self.left_partial
    }

    pub fn is_right_partial(&self) -> bool {
        self.right_partial
    }

    pub fn is_simple(&self) -> bool {
        self.simple
    }

    pub fn has_remote(&self) -> bool {
        self.ranges.iter().any(Range::is_remote)
    }

    /// Smallest begin over positioned members; `None` if the location is
    /// all gaps (or empty).
    pub fn min_position(&self) -> Option<u64> {
        self.ranges.iter().filter_map(Range::begin).min()
    }

    pub fn max_position(&self) -> Option<u64> {
        self.ranges.iter().filter_map(Range::end).max()
    }

    /// Total number of bases the location denotes, gaps included.
    /// `None` if any gap has unknown length.
    pub fn len(&self) -> Option<u64> {
        self.ranges.iter().map(Range::span).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Envelope overlap on [min_position, max_position]. Deliberately not a
    /// per-segment comparison: downstream checks rely on the envelope
    /// semantics.
    pub fn overlaps(&self, other: &Self) -> bool {
        match (
            self.min_position(),
            self.max_position(),
            other.min_position(),
            other.max_position(),
        ) {
            (Some(a0), Some(a1), Some(b0), Some(b1)) => a0.max(b0) <= a1.min(b1),
            _ => false,
        }
    }

    /// Envelope containment on [min_position, max_position].
    pub fn contains(&self, other: &Self) -> bool {
        match (
            self.min_position(),
            self.max_position(),
            other.min_position(),
            other.max_position(),
        ) {
            (Some(a0), Some(a1), Some(b0), Some(b1)) => a0 <= b0 && b1 <= a1,
            _ => false,
        }
    }

    /// Same global strand. Per-range complement flags are ignored, matching
    /// the envelope semantics above.
    pub fn same_strand(&self, other: &Self) -> bool {
        self.global_complement == other.global_complement
    }

    /// Offset of record position `pos` in the resolved segment, honoring
    /// per-range and global orientation. Only local members are searched;
    /// remote and gap members advance the offset but cannot match.
    pub fn segment_offset_of(&self, pos: u64) -> Option<usize> {
        let total = self.len()?;
        let mut acc = 0u64;
        let mut found = None;
        for range in &self.ranges {
            if let Range::Local {
                begin,
                end,
                complement,
            } = range
            {
                if found.is_none() && pos >= *begin && pos <= *end {
                    let in_member = if *complement { end - pos } else { pos - *begin };
                    found = Some(acc + in_member);
                }
            }
            acc += range.span()?;
        }
        let offset = found?;
        let offset = if self.global_complement {
            total - 1 - offset
        } else {
            offset
        };
        Some(offset as usize)
    }
}

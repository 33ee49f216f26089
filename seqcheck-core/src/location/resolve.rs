use crate::alphabets::dna;
use crate::error::{CheckError, CheckResult};
use crate::location::{CompoundLocation, Range};
use crate::record::store::SequenceStore;

use memchr::memchr2;

/// Fill byte for gap ranges of known length.
pub const GAP_FILL: u8 = b'n';

/// The concrete bytes a location denotes, in the location's orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    bytes: Vec<u8>,
}

impl Segment {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if the segment carries `N`/`n` bases (including gap fill).
    pub fn has_ambiguity(&self) -> bool {
        memchr2(b'N', b'n', &self.bytes).is_some()
    }
}

/// Extract the bytes a compound location denotes.
///
/// Members resolve in declared order. A member with its own complement flag
/// is reverse-complemented before concatenation; the assembled segment is
/// reverse-complemented once more if the global flag is set, so each
/// member's net orientation is global XOR member.
///
/// Coordinates of every positioned member are validated before any byte
/// (or remote) access.
pub fn resolve(store: &SequenceStore, location: &CompoundLocation) -> CheckResult<Segment> {
    for range in location.ranges() {
        check_coordinates(range)?;
    }

    let mut bytes = match location.len() {
        Some(n) => Vec::with_capacity(n as usize),
        None => Vec::new(),
    };
    for range in location.ranges() {
        let part = range_bytes(store, range)?;
        if range.complement() {
            bytes.extend_from_slice(&dna::reverse_complement(&part));
        } else {
            bytes.extend_from_slice(&part);
        }
    }

    let bytes = if location.is_complement() {
        dna::reverse_complement(&bytes)
    } else {
        bytes
    };
    Ok(Segment { bytes })
}

/// Resolve a single range in its own orientation (per-exon access).
pub fn resolve_range(store: &SequenceStore, range: &Range) -> CheckResult<Segment> {
    check_coordinates(range)?;
    let part = range_bytes(store, range)?;
    let bytes = if range.complement() {
        dna::reverse_complement(&part)
    } else {
        part
    };
    Ok(Segment { bytes })
}

fn check_coordinates(range: &Range) -> CheckResult<()> {
    if let (Some(begin), Some(end)) = (range.begin(), range.end()) {
        if begin == 0 || begin > end {
            return Err(CheckError::InvalidLocation { begin, end });
        }
    }
    Ok(())
}

fn range_bytes(store: &SequenceStore, range: &Range) -> CheckResult<Vec<u8>> {
    match range {
        Range::Local { begin, end, .. } => {
            if *end > store.len() {
                return Err(CheckError::OutOfBounds {
                    accession: store.accession().into(),
                    begin: *begin,
                    end: *end,
                    length: store.len(),
                });
            }
            Ok(store.bases()[(*begin - 1) as usize..*end as usize].to_vec())
        }
        Range::Remote {
            accession,
            version,
            begin,
            end,
            ..
        } => {
            if accession.is_empty() {
                return Err(CheckError::UnresolvedRemote {
                    accession: accession.clone(),
                    version: *version,
                    reason: "empty accession".into(),
                });
            }
            let subject = store.resolve_remote(accession, *version)?;
            if *end > subject.len() as u64 {
                return Err(CheckError::OutOfBounds {
                    accession: accession.clone(),
                    begin: *begin,
                    end: *end,
                    length: subject.len() as u64,
                });
            }
            Ok(subject[(*begin - 1) as usize..*end as usize].to_vec())
        }
        Range::Gap { length } => match length {
            Some(n) => Ok(vec![GAP_FILL; *n as usize]),
            None => Err(CheckError::OutOfBounds {
                accession: store.accession().into(),
                begin: 0,
                end: 0,
                length: store.len(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::store::RemoteFetcher;
    use proptest::prelude::*;

    const BASES: &[u8] = b"ATGCCCAAATAG";

    fn store() -> SequenceStore<'static> {
        SequenceStore::new("A00001", BASES)
    }

    struct OneRecord;

    impl RemoteFetcher for OneRecord {
        fn fetch(&self, accession: &str, version: Option<u32>) -> CheckResult<Vec<u8>> {
            match accession {
                "X00001" => Ok(b"ATGAAATAG".to_vec()),
                _ => Err(CheckError::UnresolvedRemote {
                    accession: accession.into(),
                    version,
                    reason: "not found".into(),
                }),
            }
        }
    }

    struct PanicFetcher;

    impl RemoteFetcher for PanicFetcher {
        fn fetch(&self, _accession: &str, _version: Option<u32>) -> CheckResult<Vec<u8>> {
            panic!("fetch must not run for invalid locations");
        }
    }

    #[test]
    fn simple_local_slice() {
        let loc = CompoundLocation::single(Range::local(1, 9));
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"ATGCCCAAA");
        assert!(!seg.has_ambiguity());
    }

    #[test]
    fn join_concatenates_in_order() {
        let loc = CompoundLocation::join(vec![Range::local(1, 3), Range::local(7, 9)]);
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"ATGAAA");
    }

    #[test]
    fn global_complement_reverses_assembly() {
        let loc =
            CompoundLocation::join(vec![Range::local(1, 3), Range::local(7, 9)]).with_complement();
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"TTTCAT");
    }

    #[test]
    fn member_complement_before_concatenation() {
        let loc = CompoundLocation::join(vec![Range::local_complement(1, 3), Range::local(7, 9)]);
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"CATAAA");
    }

    #[test]
    fn member_and_global_complement_cancel() {
        let loc = CompoundLocation::single(Range::local_complement(1, 3)).with_complement();
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"ATG");
    }

    #[test]
    fn known_gap_fills() {
        let loc = CompoundLocation::join(vec![
            Range::local(1, 3),
            Range::gap(Some(4)),
            Range::local(7, 9),
        ]);
        let seg = resolve(&store(), &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"ATGnnnnAAA");
        assert!(seg.has_ambiguity());
    }

    #[test]
    fn unknown_gap_fails() {
        let loc = CompoundLocation::join(vec![Range::local(1, 3), Range::gap(None)]);
        let err = resolve(&store(), &loc).unwrap_err();
        assert!(matches!(err, CheckError::OutOfBounds { .. }));
    }

    #[test]
    fn remote_without_resolver_is_unresolved() {
        let loc = CompoundLocation::single(Range::remote("X00001", Some(1), 1, 9));
        let err = resolve(&store(), &loc).unwrap_err();
        match err {
            CheckError::UnresolvedRemote { accession, .. } => {
                assert_eq!(&*accession, "X00001");
            }
            other => panic!("expected UnresolvedRemote, got {other:?}"),
        }
    }

    #[test]
    fn remote_resolves_through_fetcher() {
        let fetcher = OneRecord;
        let store = SequenceStore::new("A00001", BASES).with_fetcher(&fetcher);
        let loc = CompoundLocation::join(vec![
            Range::local(1, 3),
            Range::remote("X00001", Some(1), 4, 6),
        ]);
        let seg = resolve(&store, &loc).unwrap();
        assert_eq!(seg.as_bytes(), b"ATGAAA");
    }

    #[test]
    fn remote_out_of_bounds_names_remote_accession() {
        let fetcher = OneRecord;
        let store = SequenceStore::new("A00001", BASES).with_fetcher(&fetcher);
        let loc = CompoundLocation::single(Range::remote("X00001", Some(1), 5, 50));
        match resolve(&store, &loc).unwrap_err() {
            CheckError::OutOfBounds {
                accession, length, ..
            } => {
                assert_eq!(&*accession, "X00001");
                assert_eq!(length, 9);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn local_out_of_bounds() {
        let loc = CompoundLocation::single(Range::local(1, 100));
        match resolve(&store(), &loc).unwrap_err() {
            CheckError::OutOfBounds {
                accession,
                begin,
                end,
                length,
            } => {
                assert_eq!(&*accession, "A00001");
                assert_eq!((begin, end, length), (1, 100, 12));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn inverted_coordinates_fail_before_any_access() {
        let fetcher = PanicFetcher;
        let store = SequenceStore::new("A00001", BASES).with_fetcher(&fetcher);
        let loc = CompoundLocation::join(vec![
            Range::remote("X00001", Some(1), 1, 9),
            Range::local(50, 10),
        ]);
        let err = resolve(&store, &loc).unwrap_err();
        assert!(matches!(
            err,
            CheckError::InvalidLocation { begin: 50, end: 10 }
        ));
    }

    #[test]
    fn resolve_range_honors_member_orientation() {
        let seg = resolve_range(&store(), &Range::local(1, 3)).unwrap();
        assert_eq!(seg.as_bytes(), b"ATG");
        let seg = resolve_range(&store(), &Range::local_complement(1, 3)).unwrap();
        assert_eq!(seg.as_bytes(), b"CAT");
        assert!(resolve_range(&store(), &Range::local(10, 4)).is_err());
    }

    #[test]
    fn zero_begin_fails() {
        let loc = CompoundLocation::single(Range::local(0, 5));
        assert!(matches!(
            resolve(&store(), &loc).unwrap_err(),
            CheckError::InvalidLocation { .. }
        ));
    }

    proptest! {
        #[test]
        fn reverse_complement_involution(
            s in prop::collection::vec(
                prop_oneof![
                    Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T'), Just(b'N'),
                    Just(b'a'), Just(b'c'), Just(b'g'), Just(b't'), Just(b'n'),
                ],
                0..200,
            )
        ) {
            let twice = dna::reverse_complement(&dna::reverse_complement(&s));
            prop_assert_eq!(twice, s);
        }
    }

    proptest! {
        #[test]
        fn join_length_is_sum_of_spans(
            spans in prop::collection::vec((1u64..30, 1u64..20), 1..6)
        ) {
            // build non-overlapping local ranges over one long subject
            let mut bases = Vec::new();
            let mut ranges = Vec::new();
            let mut cursor = 1u64;
            for (gap, len) in spans {
                cursor += gap;
                ranges.push(Range::local(cursor, cursor + len - 1));
                cursor += len;
            }
            while (bases.len() as u64) < cursor {
                bases.extend_from_slice(b"ACGT");
            }
            let expected: u64 = ranges.iter().map(|r| r.span().unwrap()).sum();
            let store = SequenceStore::new("A00001", &bases);
            let seg = resolve(&store, &CompoundLocation::join(ranges)).unwrap();
            prop_assert_eq!(seg.len() as u64, expected);
        }
    }
}

use crate::alphabets::protein;
use crate::codes::{select_table, GeneticCodeTable, TableContext, Translated};
use crate::error::{CheckError, CheckResult};
use crate::location::{resolve, CompoundLocation, LocationKind, Range};
use crate::record::feature::{qualifier_names, Feature};
use crate::record::store::RemoteFetcher;
use crate::record::Record;
use crate::translate::codon::{translate_codons, Codon};
use crate::translate::{Diagnostic, TranslationResult};

/// Parsed `/transl_except` qualifier: an explicit amino acid for one
/// codon's record range, e.g. `(pos:214..216,aa:Sec)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslExcept {
    pub begin: u64,
    pub end: u64,
    pub amino_acid: u8,
}

impl TranslExcept {
    pub fn parse(value: &str) -> CheckResult<Self> {
        let invalid = || CheckError::InvalidQualifier {
            name: qualifier_names::TRANSL_EXCEPT.into(),
            value: value.into(),
        };
        let inner = value
            .trim()
            .strip_prefix('(')
            .and_then(|v| v.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (pos, aa) = inner.split_once(',').ok_or_else(invalid)?;
        let pos = pos.trim().strip_prefix("pos:").ok_or_else(invalid)?;
        let aa = aa.trim().strip_prefix("aa:").ok_or_else(invalid)?;
        let pos = pos
            .strip_prefix("complement(")
            .and_then(|p| p.strip_suffix(')'))
            .unwrap_or(pos);
        let (begin, end) = match pos.split_once("..") {
            Some((b, e)) => (
                b.trim().parse().map_err(|_| invalid())?,
                e.trim().parse().map_err(|_| invalid())?,
            ),
            None => {
                let p: u64 = pos.trim().parse().map_err(|_| invalid())?;
                (p, p)
            }
        };
        let amino_acid = protein::from_three_letter(aa.trim()).ok_or_else(invalid)?;
        Ok(Self {
            begin,
            end,
            amino_acid,
        })
    }
}

/// Translates one record's features. Each call is a pure function of the
/// feature, the record's bases and context, and the optional resolver;
/// nothing is shared or mutated between calls.
pub struct FeatureTranslator<'a> {
    record: &'a Record,
    fetcher: Option<&'a dyn RemoteFetcher>,
}

impl<'a> FeatureTranslator<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: &'a dyn RemoteFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Genetic-code table for a feature: explicit `/transl_table` wins,
    /// then organelle context, then the default table.
    pub fn table_for(&self, feature: &Feature) -> CheckResult<&'static GeneticCodeTable> {
        let ctx = TableContext {
            transl_table: feature.qualifier(qualifier_names::TRANSL_TABLE),
            organelle: feature
                .qualifier(qualifier_names::ORGANELLE)
                .or_else(|| self.record.organelle()),
            lineage: self.record.organism(),
        };
        select_table(&ctx)
    }

    /// Translate one feature's location into amino acids.
    ///
    /// Any failure is a typed result; a bad annotation on one feature
    /// must not abort validation of its siblings.
    pub fn translate_feature(&self, feature: &Feature) -> CheckResult<TranslationResult> {
        let table = self.table_for(feature)?;

        let store = self.record.store(self.fetcher);
        let segment = resolve(&store, feature.location())?;

        let mut diagnostics = Vec::new();
        if let Some(after) = non_adjacent_join(feature.location()) {
            if !feature.has_qualifier(qualifier_names::RIBOSOMAL_SLIPPAGE) {
                diagnostics.push(Diagnostic::NonAdjacentJoin { after });
            }
        }

        let offset = codon_start_offset(feature)?;
        let run = translate_codons(table, segment.as_bytes(), offset);

        // Reassemble with the leading partial codon, renumbering from 1.
        let head = usize::from(offset > 0 && !segment.is_empty());
        let mut codons = Vec::with_capacity(run.codons.len() + head);
        if head == 1 {
            let avail = offset.min(segment.len());
            let mut bases = [b'-'; 3];
            bases[3 - avail..].copy_from_slice(&segment.as_bytes()[..avail]);
            codons.push(Codon {
                bases,
                amino_acid: b'X',
                partial: true,
                position: 1,
            });
        }
        for mut codon in run.codons {
            codon.position += head;
            codons.push(codon);
        }

        // Codon exceptions override the table lookup.
        let mut overridden = Vec::new();
        for value in feature.qualifiers_named(qualifier_names::TRANSL_EXCEPT) {
            let except = TranslExcept::parse(value)?;
            let location = feature.location();
            let target = match (
                location.segment_offset_of(except.begin),
                location.segment_offset_of(except.end),
            ) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                // remote or out-of-location span: leave the lookup alone
                (None, None) => None,
            };
            if let Some(seg_offset) = target {
                if seg_offset >= offset {
                    let idx = head + (seg_offset - offset) / 3;
                    if let Some(codon) = codons.get_mut(idx) {
                        codon.amino_acid = except.amino_acid;
                        overridden.push(codon.position);
                    }
                }
            }
        }

        // Stop bookkeeping over the final (possibly overridden) codons.
        let last_full = codons.iter().rev().find(|c| !c.partial).map(|c| c.position);
        let mut terminal_stop = false;
        for codon in codons.iter().filter(|c| !c.partial) {
            if codon.amino_acid == b'*' {
                if Some(codon.position) == last_full && run.trailing.is_empty() {
                    terminal_stop = true;
                } else {
                    diagnostics.push(Diagnostic::InternalStop {
                        codon: codon.position,
                    });
                }
            } else if codon.amino_acid == b'X'
                && !overridden.contains(&codon.position)
                && table.translate(&codon.bases) == Translated::Unknown
            {
                diagnostics.push(Diagnostic::UnknownCodon {
                    codon: codon.position,
                });
            }
        }

        if !run.trailing.is_empty() {
            diagnostics.push(Diagnostic::NotMultipleOfThree {
                trailing: run.trailing.len(),
            });
        }

        let location = feature.location();
        if !location.is_left_partial() && offset == 0 {
            if let Some(first) = codons.iter().find(|c| !c.partial) {
                if !table.is_start(&first.bases) {
                    diagnostics.push(Diagnostic::MissingStartCodon { codon: first.bases });
                }
            }
        }
        if !location.is_right_partial() && !terminal_stop && !codons.is_empty() {
            diagnostics.push(Diagnostic::NoTerminalStop);
        }

        let protein: Vec<u8> = codons
            .iter()
            .filter(|c| !c.partial)
            .filter(|c| !(terminal_stop && Some(c.position) == last_full))
            .map(|c| c.amino_acid)
            .collect();

        Ok(TranslationResult {
            protein,
            codons,
            trailing: run.trailing,
            table: table.number(),
            diagnostics,
        })
    }

    /// Translate every CDS feature, isolating per-feature failures.
    /// Returns (feature index, outcome) pairs in feature order.
    pub fn translate_features(&self) -> Vec<(usize, CheckResult<TranslationResult>)> {
        let cds: Vec<(usize, &Feature)> = self
            .record
            .features()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_cds())
            .collect();
        par_map!(&cds, |&(i, feature)| (i, self.translate_feature(feature)))
    }

    /// Strict batch: amino-acid strings for every CDS, first failure wins.
    pub fn proteins(&self) -> CheckResult<Vec<Vec<u8>>> {
        let cds: Vec<&Feature> = self.record.features().iter().filter(|f| f.is_cds()).collect();
        par_try_map!(&cds, |&feature| {
            self.translate_feature(feature)
                .map(|result| result.protein().to_vec())
        })
    }
}

fn codon_start_offset(feature: &Feature) -> CheckResult<usize> {
    match feature.qualifier(qualifier_names::CODON_START) {
        None => Ok(0),
        Some(raw) => match raw.trim().parse::<u8>() {
            Ok(v @ 1..=3) => Ok(usize::from(v - 1)),
            _ => Err(CheckError::InvalidQualifier {
                name: qualifier_names::CODON_START.into(),
                value: raw.into(),
            }),
        },
    }
}

/// First break in a Join's local-member adjacency, as the index of the
/// member the break follows. Gap and remote members reset the check;
/// mixed-orientation neighbors are not compared.
fn non_adjacent_join(location: &CompoundLocation) -> Option<usize> {
    if location.kind() != LocationKind::Join {
        return None;
    }
    let mut prev: Option<(usize, u64, u64, bool)> = None;
    for (i, range) in location.ranges().iter().enumerate() {
        match range {
            Range::Local {
                begin,
                end,
                complement,
            } => {
                if let Some((pi, p_begin, p_end, p_complement)) = prev {
                    if *complement == p_complement {
                        let adjacent = if *complement {
                            *end + 1 == p_begin
                        } else {
                            *begin == p_end + 1
                        };
                        if !adjacent {
                            return Some(pi);
                        }
                    }
                }
                prev = Some((i, *begin, *end, *complement));
            }
            Range::Remote { .. } | Range::Gap { .. } => {
                prev = None;
            }
        }
    }
    None
}

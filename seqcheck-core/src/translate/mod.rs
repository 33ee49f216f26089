pub mod codon;
pub mod feature;

pub use codon::{translate_codons, Codon, CodonRun};
pub use feature::{FeatureTranslator, TranslExcept};

/// Non-fatal findings attached to a successful translation. The calling
/// rule decides severity from the surrounding biological context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Stop codon before the final codon position (1-based codon index).
    InternalStop { codon: usize },
    /// 1-2 unused bases after the last full codon.
    NotMultipleOfThree { trailing: usize },
    /// Codon with ambiguity or gap symbols, translated as X.
    UnknownCodon { codon: usize },
    /// Join members not adjacent after the given member index, with no
    /// ribosomal-slippage qualifier to account for it.
    NonAdjacentJoin { after: usize },
    /// 3'-complete coding region without a terminal stop codon.
    NoTerminalStop,
    /// 5'-complete coding region whose first codon is not a start codon
    /// of the selected table.
    MissingStartCodon { codon: [u8; 3] },
}

/// Outcome of one feature translation. Created fresh per call; two calls
/// on the same feature may use different genetic-code tables depending on
/// caller-provided context, so nothing is cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    protein: Vec<u8>,
    codons: Vec<Codon>,
    trailing: Vec<u8>,
    table: u8,
    diagnostics: Vec<Diagnostic>,
}

impl TranslationResult {
    /// Amino-acid string over the full codons, internal stops included as
    /// `*`, the terminal stop and any leading partial codon excluded.
    pub fn protein(&self) -> &[u8] {
        &self.protein
    }

    /// Translation length in amino acids.
    pub fn residue_len(&self) -> usize {
        self.protein.len()
    }

    /// Per-codon detail, including any leading partial codon.
    pub fn codons(&self) -> &[Codon] {
        &self.codons
    }

    /// Unused bases after the last full codon.
    pub fn trailing(&self) -> &[u8] {
        &self.trailing
    }

    /// Number of the genetic-code table the translation used.
    pub fn table(&self) -> u8 {
        self.table
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_internal_stop(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::InternalStop { .. }))
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

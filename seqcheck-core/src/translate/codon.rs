use crate::codes::{GeneticCodeTable, Translated};

/// One translated codon. A leading partial codon pads its missing 5'
/// bases with `-` and reports X.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codon {
    pub bases: [u8; 3],
    pub amino_acid: u8,
    pub partial: bool,
    /// 1-based position in the codon list.
    pub position: usize,
}

/// Mechanical split of a byte run into codons. No biology beyond the
/// table lookup; offsets and exceptions live in the feature translator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonRun {
    pub codons: Vec<Codon>,
    /// 0-2 remainder bytes, recorded as a partial trailing codon.
    pub trailing: Vec<u8>,
    /// 1-based positions of stop codons before the final codon position.
    pub internal_stops: Vec<usize>,
    /// True if the last full codon is a stop and nothing trails it.
    pub terminal_stop: bool,
}

impl CodonRun {
    /// Full codons excluding a single terminal stop, per CDS-length
    /// convention.
    pub fn residue_len(&self) -> usize {
        self.codons.len() - usize::from(self.terminal_stop)
    }
}

/// Split `bytes[start_offset..]` into consecutive 3-byte codons and look
/// each up in `table`. The final 1-2 byte remainder is recorded, not
/// translated.
pub fn translate_codons(table: &GeneticCodeTable, bytes: &[u8], start_offset: usize) -> CodonRun {
    let body = bytes.get(start_offset..).unwrap_or(&[]);

    let mut codons = Vec::with_capacity(body.len() / 3);
    for (i, chunk) in body.chunks_exact(3).enumerate() {
        let bases = [chunk[0], chunk[1], chunk[2]];
        let amino_acid = match table.translate(&bases) {
            Translated::AminoAcid(aa) => aa,
            Translated::Stop => b'*',
            Translated::Unknown => b'X',
        };
        codons.push(Codon {
            bases,
            amino_acid,
            partial: false,
            position: i + 1,
        });
    }
    let trailing = body.chunks_exact(3).remainder().to_vec();

    let total = codons.len();
    let mut internal_stops = Vec::new();
    let mut terminal_stop = false;
    for codon in &codons {
        if codon.amino_acid == b'*' {
            if codon.position == total && trailing.is_empty() {
                terminal_stop = true;
            } else {
                internal_stops.push(codon.position);
            }
        }
    }

    CodonRun {
        codons,
        trailing,
        internal_stops,
        terminal_stop,
    }
}

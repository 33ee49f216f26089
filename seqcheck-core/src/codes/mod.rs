use crate::error::{CheckError, CheckResult};
use std::sync::LazyLock;

pub const DEFAULT_TABLE: u8 = 1;

/// Outcome of a single codon lookup. `Unknown` covers ambiguity and gap
/// symbols that do not resolve to one amino acid; it is not a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translated {
    AminoAcid(u8),
    Stop,
    Unknown,
}

/// One NCBI genetic code table: 64 codon entries in TCAG order plus the
/// table's start and stop codon sets. Instances are immutable statics
/// shared by every caller.
#[derive(Debug)]
pub struct GeneticCodeTable {
    number: u8,
    name: &'static str,
    aa: &'static [u8; 64],
    starts: &'static [[u8; 3]],
    stops: &'static [[u8; 3]],
}

static BASE_INDEX: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [255u8; 256];
    for (i, &b) in b"TCAG".iter().enumerate() {
        map[b as usize] = i as u8;
        map[b as usize + 32] = i as u8;
    }
    // RNA input translates the same way
    map[b'U' as usize] = 0;
    map[b'u' as usize] = 0;
    map
});

#[inline]
fn codon_index(codon: &[u8; 3]) -> Option<usize> {
    let i1 = BASE_INDEX[codon[0] as usize];
    let i2 = BASE_INDEX[codon[1] as usize];
    let i3 = BASE_INDEX[codon[2] as usize];
    if i1 == 255 || i2 == 255 || i3 == 255 {
        return None;
    }
    Some(((i1 as usize) << 4) | ((i2 as usize) << 2) | (i3 as usize))
}

fn canonical(codon: &[u8; 3]) -> Option<[u8; 3]> {
    let mut out = [0u8; 3];
    for (dst, &b) in out.iter_mut().zip(codon.iter()) {
        *dst = match BASE_INDEX[b as usize] {
            0 => b'T',
            1 => b'C',
            2 => b'A',
            3 => b'G',
            _ => return None,
        };
    }
    Some(out)
}

impl GeneticCodeTable {
    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn amino_acids(&self) -> &'static [u8; 64] {
        self.aa
    }

    pub fn start_codons(&self) -> &'static [[u8; 3]] {
        self.starts
    }

    pub fn stop_codons(&self) -> &'static [[u8; 3]] {
        self.stops
    }

    pub fn translate(&self, codon: &[u8; 3]) -> Translated {
        match codon_index(codon) {
            Some(i) => {
                let aa = self.aa[i];
                if aa == b'*' {
                    Translated::Stop
                } else {
                    Translated::AminoAcid(aa)
                }
            }
            None => Translated::Unknown,
        }
    }

    pub fn is_start(&self, codon: &[u8; 3]) -> bool {
        match canonical(codon) {
            Some(c) => self.starts.contains(&c),
            None => false,
        }
    }

    pub fn is_stop(&self, codon: &[u8; 3]) -> bool {
        match canonical(codon) {
            Some(c) => self.stops.contains(&c),
            None => false,
        }
    }

    /// Table lookup by NCBI number.
    pub fn for_number(number: u8) -> CheckResult<&'static GeneticCodeTable> {
        TABLES
            .iter()
            .find(|t| t.number == number)
            .ok_or(CheckError::UnknownTable { table: number })
    }

    pub fn default_table() -> &'static GeneticCodeTable {
        &TABLES[0]
    }

    pub fn all() -> &'static [GeneticCodeTable] {
        &TABLES
    }
}

/// Context for table selection: explicit qualifier beats organelle beats
/// the default. Pure and deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableContext<'a> {
    pub transl_table: Option<&'a str>,
    pub organelle: Option<&'a str>,
    pub lineage: Option<&'a str>,
}

const PLASTID_ORGANELLES: &[&str] = &[
    "chloroplast",
    "plastid",
    "chromoplast",
    "cyanelle",
    "apicoplast",
    "proplastid",
    "leucoplast",
    "amyloplast",
];

pub fn select_table(ctx: &TableContext) -> CheckResult<&'static GeneticCodeTable> {
    if let Some(raw) = ctx.transl_table {
        let number: u8 = raw.trim().parse().map_err(|_| CheckError::InvalidQualifier {
            name: "transl_table".into(),
            value: raw.into(),
        })?;
        return GeneticCodeTable::for_number(number);
    }
    if let Some(organelle) = ctx.organelle {
        let organelle = organelle.to_ascii_lowercase();
        if organelle.contains("mitochondri") || organelle.contains("kinetoplast") {
            let lineage = ctx.lineage.unwrap_or("");
            let number = if lineage.contains("Vertebrata") {
                2
            } else if lineage.contains("Metazoa") {
                5
            } else if lineage.contains("Fungi") {
                4
            } else {
                2
            };
            return GeneticCodeTable::for_number(number);
        }
        if PLASTID_ORGANELLES.iter().any(|p| organelle.contains(p)) {
            return GeneticCodeTable::for_number(11);
        }
    }
    Ok(GeneticCodeTable::default_table())
}

// NCBI tables in TCAG codon order (TTT, TTC, TTA, TTG, TCT, ...). Numbers
// 7, 8 and 17-20 are unassigned in the registry.
static TABLES: [GeneticCodeTable; 19] = [
    GeneticCodeTable {
        number: 1,
        name: "Standard",
        aa: b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"TTG", *b"CTG", *b"ATG"],
        stops: &[*b"TAA", *b"TAG", *b"TGA"],
    },
    GeneticCodeTable {
        number: 2,
        name: "Vertebrate Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        starts: &[*b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG", *b"AGA", *b"AGG"],
    },
    GeneticCodeTable {
        number: 3,
        name: "Yeast Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATA", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 4,
        name: "Mold, Protozoan, and Coelenterate Mitochondrial; Mycoplasma/Spiroplasma",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[
            *b"TTA", *b"TTG", *b"CTG", *b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG",
        ],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 5,
        name: "Invertebrate Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        starts: &[*b"TTG", *b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 6,
        name: "Ciliate, Dasycladacean and Hexamita Nuclear",
        aa: b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TGA"],
    },
    GeneticCodeTable {
        number: 9,
        name: "Echinoderm and Flatworm Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        starts: &[*b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 10,
        name: "Euplotid Nuclear",
        aa: b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 11,
        name: "Bacterial, Archaeal and Plant Plastid",
        aa: b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[
            *b"TTG", *b"CTG", *b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG",
        ],
        stops: &[*b"TAA", *b"TAG", *b"TGA"],
    },
    GeneticCodeTable {
        number: 12,
        name: "Alternative Yeast Nuclear",
        aa: b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"CTG", *b"ATG"],
        stops: &[*b"TAA", *b"TAG", *b"TGA"],
    },
    GeneticCodeTable {
        number: 13,
        name: "Ascidian Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
        starts: &[*b"TTG", *b"ATA", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 14,
        name: "Alternative Flatworm Mitochondrial",
        aa: b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TAG"],
    },
    GeneticCodeTable {
        number: 15,
        name: "Blepharisma Macronuclear",
        aa: b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TAA", *b"TGA"],
    },
    GeneticCodeTable {
        number: 16,
        name: "Chlorophycean Mitochondrial",
        aa: b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TAA", *b"TGA"],
    },
    GeneticCodeTable {
        number: 21,
        name: "Trematode Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        starts: &[*b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 22,
        name: "Scenedesmus obliquus Mitochondrial",
        aa: b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATG"],
        stops: &[*b"TCA", *b"TAA", *b"TGA"],
    },
    GeneticCodeTable {
        number: 23,
        name: "Thraustochytrium Mitochondrial",
        aa: b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"ATT", *b"ATG", *b"GTG"],
        stops: &[*b"TTA", *b"TAA", *b"TAG", *b"TGA"],
    },
    GeneticCodeTable {
        number: 24,
        name: "Rhabdopleuridae Mitochondrial",
        aa: b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        starts: &[*b"TTG", *b"CTG", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
    GeneticCodeTable {
        number: 25,
        name: "Candidate Division SR1 and Gracilibacteria",
        aa: b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        starts: &[*b"TTG", *b"ATG", *b"GTG"],
        stops: &[*b"TAA", *b"TAG"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_number() {
        assert_eq!(GeneticCodeTable::for_number(1).unwrap().name(), "Standard");
        assert_eq!(GeneticCodeTable::for_number(11).unwrap().number(), 11);
        assert!(matches!(
            GeneticCodeTable::for_number(7).unwrap_err(),
            CheckError::UnknownTable { table: 7 }
        ));
        assert!(GeneticCodeTable::for_number(99).is_err());
    }

    #[test]
    fn standard_lookups() {
        let t = GeneticCodeTable::default_table();
        assert_eq!(t.translate(b"ATG"), Translated::AminoAcid(b'M'));
        assert_eq!(t.translate(b"TGG"), Translated::AminoAcid(b'W'));
        assert_eq!(t.translate(b"TAA"), Translated::Stop);
        assert_eq!(t.translate(b"TGA"), Translated::Stop);
        assert_eq!(t.translate(b"NTG"), Translated::Unknown);
        // case and RNA bases fold
        assert_eq!(t.translate(b"aug"), Translated::AminoAcid(b'M'));
    }

    #[test]
    fn per_table_reassignments() {
        let t2 = GeneticCodeTable::for_number(2).unwrap();
        assert_eq!(t2.translate(b"TGA"), Translated::AminoAcid(b'W'));
        assert_eq!(t2.translate(b"AGA"), Translated::Stop);
        assert_eq!(t2.translate(b"ATA"), Translated::AminoAcid(b'M'));

        let t5 = GeneticCodeTable::for_number(5).unwrap();
        assert_eq!(t5.translate(b"AGA"), Translated::AminoAcid(b'S'));

        let t6 = GeneticCodeTable::for_number(6).unwrap();
        assert_eq!(t6.translate(b"TAA"), Translated::AminoAcid(b'Q'));
        assert_eq!(t6.translate(b"TGA"), Translated::Stop);

        let t12 = GeneticCodeTable::for_number(12).unwrap();
        assert_eq!(t12.translate(b"CTG"), Translated::AminoAcid(b'S'));
    }

    #[test]
    fn start_and_stop_sets() {
        let t11 = GeneticCodeTable::for_number(11).unwrap();
        assert!(t11.is_start(b"GTG"));
        assert!(t11.is_start(b"ttg"));
        assert!(!t11.is_start(b"AAA"));
        assert!(t11.is_stop(b"TGA"));

        let t1 = GeneticCodeTable::default_table();
        assert!(t1.is_start(b"ATG"));
        assert!(!t1.is_start(b"GTG"));
        assert!(!t1.is_stop(b"NNN"));
    }

    #[test]
    fn table_totality() {
        let amino = crate::alphabets::protein::alphabet();
        for table in GeneticCodeTable::all() {
            assert_eq!(table.amino_acids().len(), 64);
            for &aa in table.amino_acids().iter() {
                assert!(
                    aa == b'*' || amino.contains(aa),
                    "table {} maps a codon to '{}'",
                    table.number(),
                    aa as char
                );
            }
            // stop set and '*' entries agree
            for i in 0..64u8 {
                let codon = [
                    b"TCAG"[(i >> 4) as usize],
                    b"TCAG"[((i >> 2) & 3) as usize],
                    b"TCAG"[(i & 3) as usize],
                ];
                let is_star = table.amino_acids()[i as usize] == b'*';
                assert_eq!(
                    is_star,
                    table.is_stop(&codon),
                    "table {} codon {:?}",
                    table.number(),
                    std::str::from_utf8(&codon).unwrap()
                );
            }
            // every declared start translates
            for start in table.start_codons() {
                assert!(table.translate(start) != Translated::Unknown);
            }
        }
    }

    #[test]
    fn selection_explicit_qualifier_wins() {
        let ctx = TableContext {
            transl_table: Some("11"),
            organelle: Some("mitochondrion"),
            lineage: Some("Eukaryota; Metazoa; Vertebrata"),
        };
        assert_eq!(select_table(&ctx).unwrap().number(), 11);
    }

    #[test]
    fn selection_explicit_unknown_fails() {
        let ctx = TableContext {
            transl_table: Some("17"),
            ..Default::default()
        };
        assert!(matches!(
            select_table(&ctx).unwrap_err(),
            CheckError::UnknownTable { table: 17 }
        ));
    }

    #[test]
    fn selection_explicit_unparseable_fails() {
        let ctx = TableContext {
            transl_table: Some("standard"),
            ..Default::default()
        };
        assert!(matches!(
            select_table(&ctx).unwrap_err(),
            CheckError::InvalidQualifier { .. }
        ));
    }

    #[test]
    fn selection_by_organelle() {
        let vert = TableContext {
            organelle: Some("mitochondrion"),
            lineage: Some("Eukaryota; Metazoa; Chordata; Vertebrata"),
            ..Default::default()
        };
        assert_eq!(select_table(&vert).unwrap().number(), 2);

        let invert = TableContext {
            organelle: Some("mitochondrion"),
            lineage: Some("Eukaryota; Metazoa; Arthropoda"),
            ..Default::default()
        };
        assert_eq!(select_table(&invert).unwrap().number(), 5);

        let fungal = TableContext {
            organelle: Some("mitochondrion"),
            lineage: Some("Eukaryota; Fungi; Ascomycota"),
            ..Default::default()
        };
        assert_eq!(select_table(&fungal).unwrap().number(), 4);

        let plastid = TableContext {
            organelle: Some("plastid:chloroplast"),
            ..Default::default()
        };
        assert_eq!(select_table(&plastid).unwrap().number(), 11);
    }

    #[test]
    fn selection_default_and_deterministic() {
        let ctx = TableContext::default();
        assert_eq!(select_table(&ctx).unwrap().number(), DEFAULT_TABLE);

        let mito = TableContext {
            organelle: Some("mitochondrion"),
            lineage: Some("Eukaryota; Viridiplantae"),
            ..Default::default()
        };
        let a = select_table(&mito).unwrap().number();
        let b = select_table(&mito).unwrap().number();
        assert_eq!(a, b);
    }
}

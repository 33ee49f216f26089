use crate::alphabets::dna;
use crate::error::{CheckError, CheckResult};
use crate::record::feature::Feature;
use crate::record::store::{RemoteFetcher, SequenceStore};

/// One sequence record: raw bases plus the annotation context the
/// translation engine reads (organism lineage, organelle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    accession: Box<str>,
    version: Option<u32>,
    bases: Vec<u8>,
    organism: Option<Box<str>>,
    organelle: Option<Box<str>>,
    features: Vec<Feature>,
}

impl Record {
    pub fn new(accession: impl Into<Box<str>>, bases: Vec<u8>) -> CheckResult<Self> {
        let alphabet = dna::iupac_alphabet();
        for (pos, &b) in bases.iter().enumerate() {
            if !alphabet.contains(b) {
                return Err(CheckError::InvalidChar { ch: b as char, pos });
            }
        }
        Ok(Self {
            accession: accession.into(),
            version: None,
            bases,
            organism: None,
            organelle: None,
            features: Vec::new(),
        })
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Organism line including lineage, e.g.
    /// `"Homo sapiens; Eukaryota; Metazoa; Chordata; Vertebrata"`.
    pub fn with_organism(mut self, organism: impl Into<Box<str>>) -> Self {
        self.organism = Some(organism.into());
        self
    }

    pub fn with_organelle(mut self, organelle: impl Into<Box<str>>) -> Self {
        self.organelle = Some(organelle.into());
        self
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    pub fn push_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn organism(&self) -> Option<&str> {
        self.organism.as_deref()
    }

    pub fn organelle(&self) -> Option<&str> {
        self.organelle.as_deref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// View of this record's bases as a resolution subject.
    pub fn store<'a>(&'a self, fetcher: Option<&'a dyn RemoteFetcher>) -> SequenceStore<'a> {
        let store = SequenceStore::new(&self.accession, &self.bases);
        match fetcher {
            Some(f) => store.with_fetcher(f),
            None => store,
        }
    }
}

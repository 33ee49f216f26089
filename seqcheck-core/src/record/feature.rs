use crate::location::CompoundLocation;

/// Qualifier names the translation engine reads.
pub mod qualifier_names {
    pub const TRANSL_TABLE: &str = "transl_table";
    pub const CODON_START: &str = "codon_start";
    pub const TRANSL_EXCEPT: &str = "transl_except";
    pub const RIBOSOMAL_SLIPPAGE: &str = "ribosomal_slippage";
    pub const ORGANELLE: &str = "organelle";
}

pub mod feature_types {
    pub const CDS: &str = "CDS";
    pub const SIG_PEPTIDE: &str = "sig_peptide";
    pub const MAT_PEPTIDE: &str = "mat_peptide";
    pub const TRANSIT_PEPTIDE: &str = "transit_peptide";
    pub const PROPEPTIDE: &str = "propeptide";

    pub fn is_peptide(feature_type: &str) -> bool {
        matches!(
            feature_type,
            SIG_PEPTIDE | MAT_PEPTIDE | TRANSIT_PEPTIDE | PROPEPTIDE
        )
    }
}

/// A single name/value qualifier. Flag qualifiers carry an empty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Qualifier {
    name: Box<str>,
    value: Box<str>,
}

impl Qualifier {
    pub fn new(name: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn flag(name: impl Into<Box<str>>) -> Self {
        Self::new(name, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An annotated region of a record: type, location, ordered qualifiers.
/// Qualifiers keep their declared order and may repeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    feature_type: Box<str>,
    location: CompoundLocation,
    qualifiers: Vec<Qualifier>,
}

impl Feature {
    pub fn new(feature_type: impl Into<Box<str>>, location: CompoundLocation) -> Self {
        Self {
            feature_type: feature_type.into(),
            location,
            qualifiers: Vec::new(),
        }
    }

    pub fn with_qualifiers(mut self, qualifiers: Vec<Qualifier>) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    pub fn push_qualifier(&mut self, qualifier: Qualifier) {
        self.qualifiers.push(qualifier);
    }

    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn location(&self) -> &CompoundLocation {
        &self.location
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    /// First value of the named qualifier, if present.
    pub fn qualifier(&self, name: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|q| q.name() == name)
            .map(Qualifier::value)
    }

    /// All values of the named qualifier, in declared order.
    pub fn qualifiers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.qualifiers
            .iter()
            .filter(move |q| q.name() == name)
            .map(Qualifier::value)
    }

    pub fn has_qualifier(&self, name: &str) -> bool {
        self.qualifiers.iter().any(|q| q.name() == name)
    }

    pub fn is_cds(&self) -> bool {
        &*self.feature_type == feature_types::CDS
    }
}

use crate::record::feature::{feature_types, Feature};

/// Association of one CDS with the peptide features it covers, by index
/// into the record's feature list. Computed once per record and owned by
/// the validation pass; features hold no back-pointers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeptidePairing {
    pub cds: usize,
    pub peptides: Vec<usize>,
}

/// Pair every CDS with the peptides its location envelope covers on the
/// same global strand.
pub fn pair_peptides(features: &[Feature]) -> Vec<PeptidePairing> {
    let mut out = Vec::new();
    for (i, cds) in features.iter().enumerate() {
        if !cds.is_cds() {
            continue;
        }
        let peptides = features
            .iter()
            .enumerate()
            .filter(|(_, f)| feature_types::is_peptide(f.feature_type()))
            .filter(|(_, f)| {
                cds.location().contains(f.location()) && cds.location().same_strand(f.location())
            })
            .map(|(j, _)| j)
            .collect();
        out.push(PeptidePairing { cds: i, peptides });
    }
    out
}

pub mod entry;
pub mod feature;
pub mod pairing;
pub mod store;

pub use entry::Record;
pub use feature::{feature_types, qualifier_names, Feature, Qualifier};
pub use pairing::{pair_peptides, PeptidePairing};
pub use store::{CachingFetcher, RemoteFetcher, SequenceStore};

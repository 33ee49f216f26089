use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid location: begin {begin} > end {end} (or begin is 0)")]
    InvalidLocation { begin: u64, end: u64 },

    #[error("location {begin}..{end} out of bounds for {accession} (length {length})")]
    OutOfBounds {
        accession: Box<str>,
        begin: u64,
        end: u64,
        length: u64,
    },

    #[error("remote sequence {accession} could not be resolved: {reason}")]
    UnresolvedRemote {
        accession: Box<str>,
        version: Option<u32>,
        reason: Box<str>,
    },

    #[error("unknown genetic code table: {table}")]
    UnknownTable { table: u8 },

    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("invalid qualifier /{name}={value}")]
    InvalidQualifier { name: Box<str>, value: Box<str> },
}

pub type CheckResult<T> = Result<T, CheckError>;

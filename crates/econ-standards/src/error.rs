#![deny(unsafe_code)]

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown sector '{query}' (expected one of: {known})")]
    UnknownSector { query: String, known: String },

    #[error("unknown dataset '{query}' in {sector} (expected one of: {known})")]
    UnknownDataset {
        query: String,
        sector: String,
        known: String,
    },
}

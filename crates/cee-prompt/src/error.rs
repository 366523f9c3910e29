use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("version '{version}' not found for this prompt")]
    VersionNotFound { version: String },

    #[error("cannot promote '{candidate}' to production: '{incumbent}' is already production")]
    IncumbentProductionExists { incumbent: String, candidate: String },

    #[error("version '{version}' already exists and versions are immutable")]
    VersionAlreadyExists { version: String },
}

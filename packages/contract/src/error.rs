use ns_model::ModelError;
use thiserror::Error;

pub type ContractResult<T> = Result<T, ContractError>;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Invalid input: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to serialize contract: {0}")]
    Serialize(#[from] serde_json::Error),
}

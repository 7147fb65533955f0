//! Contract assembly - turns editor pages into the three versioned documents
//! a code generator consumes: layout, style and registry.

pub mod assembler;
pub mod documents;
pub mod envelope;
pub mod error;
pub mod text_styles;

pub use assembler::{
    registry_payload, CompileInput, CompileOptions, CompileOutput, CompileReport,
    ContractCompiler, IdCollision, PageInput,
};
pub use documents::{
    ComponentDescriptor, ComponentStyles, LayoutDocument, LayoutPayload, PageLayout,
    RegistryDocument, RegistryPayload, Structure, StyleDocument, StylePayload,
};
pub use envelope::{payload_hash, timestamp_now, Contract, Envelope};
pub use error::{ContractError, ContractResult};

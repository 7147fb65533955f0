//! Contract schema identifiers shared by the assembler and the validator

pub const LAYOUT_SCHEMA: &str = "ns.layout";
pub const STYLE_SCHEMA: &str = "ns.style";
pub const REGISTRY_SCHEMA: &str = "ns.registry";

/// Version stamped into every contract envelope
pub const CONTRACT_VERSION: &str = "1.0.0";

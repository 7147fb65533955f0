pub mod breakpoint;
pub mod error;
pub mod node;
pub mod registry;
pub mod schema;
pub mod token;

pub use breakpoint::{Breakpoint, Breakpoints};
pub use error::{json_kind, ModelError, ModelResult};
pub use node::{
    parse_token_ref, token_ref, ByBreakpoint, EnrichedEntry, EnrichedNode, LegacyNode, RawNode,
    TemplateBinding, CHILDREN_SLOT, RESPONSIVE_MARKER, TOKEN_REF_PREFIX,
};
pub use registry::{
    ComponentDefinition, ComponentRegistry, Device, PropSchema, PropType, SlotSchema,
    StyleError, StyleFunction, StyleResult,
};
pub use token::{DesignToken, TokenGroup, TokenSource};

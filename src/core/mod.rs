//! Core module containing the value model, collaborator traits and errors

pub mod error;
pub mod naming;
pub mod query_provider;
pub mod registry;
pub mod value;

pub use error::{BridgeError, BridgeResult, ConfigError, RequestError};
pub use naming::Naming;
pub use query_provider::{ChainQueryProvider, InMemoryQueryProvider, NoQueryProvider, PersistedQueryProvider};
pub use registry::{EntityKind, InMemoryTypeRegistry, PropertyDefinition, TypeDefinition, TypeRegistry};
pub use value::{Map, Params, UploadedFile, Value};

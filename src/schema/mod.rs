//! GraphQL schema shape: derived config entity fields and runtime resolvers

pub mod deriver;
pub mod fields;
pub mod sdl;
pub mod type_mapper;

pub use deriver::{FieldDescriptor, SchemaFieldDeriver};
pub use fields::{FieldDefinition, FieldResolver, InternalPathField, ResolvedValue, RouteUrl};
pub use sdl::render_sdl;
pub use type_mapper::{GraphQLScalar, PropertyTypeMapper};

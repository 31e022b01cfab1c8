//! API exposure modules
//!
//! Each exposure consumes a `BridgeHost` and produces a Router for its protocol.

pub mod graphql;

pub use graphql::GraphQLExposure;

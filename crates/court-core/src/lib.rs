//! Court Scene Core.
//!
//! Procedural geometry for a basketball court scene:
//! - Node: transform hierarchy with owned children
//! - Tessellation: arc sampling and chord segments
//! - Net: shrinking-ring net lattice
//! - Markings / Equipment: court lines and goal assemblies
//! - Scene: top-level composition of the whole court

pub mod config;
pub mod equipment;
pub mod error;
pub mod lighting;
pub mod markings;
pub mod material;
pub mod net;
pub mod node;
pub mod primitive;
pub mod resource;
pub mod scene;
pub mod side;
pub mod tessellate;

pub use config::*;
pub use equipment::*;
pub use error::*;
pub use lighting::*;
pub use markings::*;
pub use material::*;
pub use net::*;
pub use node::*;
pub use primitive::*;
pub use resource::*;
pub use scene::*;
pub use side::*;
pub use tessellate::*;

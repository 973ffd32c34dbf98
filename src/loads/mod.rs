//! Nodal and member load definitions

mod distributed;
mod node_load;
mod point_load;

pub use distributed::DistributedLoad;
pub use node_load::{Dof, GlobalDirection, NodeLoad};
pub use point_load::{LoadDirection, PointLoad};

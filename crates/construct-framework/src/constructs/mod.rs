//! Built-in resource kinds, each implementing [`Construct`](crate::Construct).

pub mod function;
pub mod gateway;
pub mod network;
pub mod queue;
pub mod security_group;
pub mod topic;

pub use function::*;
pub use gateway::*;
pub use network::*;
pub use queue::*;
pub use security_group::*;
pub use topic::*;

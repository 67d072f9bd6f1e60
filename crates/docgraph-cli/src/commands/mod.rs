//! Command implementations.

pub mod ask;
pub mod graph;
pub mod health;
pub mod profile;
pub mod upload;

pub use self::ask::execute_ask;
pub use self::graph::{emit_graph, execute_graph};
pub use self::health::execute_health;
pub use self::profile::execute_profile;
pub use self::upload::execute_upload;

//! Command implementations.

pub mod graph;
pub mod import;
pub mod links;
pub mod profile;
pub mod resolve;
pub mod summary;

pub use self::graph::execute_graph;
pub use self::import::execute_import;
pub use self::links::execute_links;
pub use self::profile::execute_profile;
pub use self::resolve::execute_resolve;
pub use self::summary::execute_summary;

//! Command implementations.

pub mod access;
pub mod analyze;
pub mod key;
pub mod schema;

pub use self::access::execute_access;
pub use self::analyze::execute_analyze;
pub use self::key::execute_key;
pub use self::schema::execute_schema;

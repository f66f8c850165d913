mod listing;
mod oracle;
mod primitives;
mod rpc;
mod token;

// Re-export all types
pub use listing::*;
pub use oracle::*;
pub use primitives::*;
pub use rpc::*;
pub use token::*;

// Keep serde_helpers internal but accessible within crate
pub(crate) mod serde_helpers;

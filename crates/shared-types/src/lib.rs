pub mod error;

// Judgment domain modules (canonical locations for all adjudication types)
pub mod case;
pub mod decision;
pub mod distribution;
pub mod member;
pub mod notification;
pub mod session;
pub mod vote;

pub use error::*;

// Re-export all domain types
pub use case::*;
pub use decision::*;
pub use distribution::*;
pub use member::*;
pub use notification::*;
pub use session::*;
pub use vote::*;

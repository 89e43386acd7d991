pub mod documents;
pub mod messages;
pub mod store;
pub mod traits;

pub use documents::DocumentSet;
pub use messages::*;
pub use store::*;
pub use traits::*;

pub mod dispatcher;
pub mod outcome;
pub mod reconciler;
pub mod session;

pub use dispatcher::{Dispatch, Dispatcher, DispatcherHandle};
pub use outcome::{MutationId, SyncOutcome};
pub use reconciler::SyncReconciler;
pub use session::BoardSession;

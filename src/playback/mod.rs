pub mod state;
pub mod sync;

pub use state::PlaybackState;
pub use sync::{decide, PlaybackSynchronizer, ProgressIndicator, SyncAction};

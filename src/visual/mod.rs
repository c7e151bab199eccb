//! Renderable description of the trim track.
//! Pure projections of the timeline; nothing here owns state.

pub mod bands;
pub mod scene;

pub use bands::{project, Band, BandKind};
pub use scene::{HandleMark, ProgressBar, TimelineScene};

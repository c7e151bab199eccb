pub mod element;
pub mod simulated;

pub use element::MediaElement;
pub use simulated::SimulatedMedia;

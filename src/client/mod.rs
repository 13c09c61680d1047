//! Client module - API client, device identity and training state

pub mod api;
pub mod device;
pub mod tracker;

pub use api::ApiClient;
pub use device::DeviceIdStore;
pub use tracker::TrainingTracker;

pub mod ratio_cycle_usecase;

// Re-export public API
pub use ratio_cycle_usecase::{CycleSettings, FetchStrategy, RatioCycle, RatioCycleUseCase};

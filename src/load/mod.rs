//! Load sessions and the orchestrator that launches and drains them.
mod orchestrator;
mod session;
mod stop;


pub use orchestrator::run_load;
pub use session::{LoadSession, SessionReport};
pub use stop::StopSignal;

pub mod checks;
pub mod frame_counter;

pub use checks::*;
pub use frame_counter::*;

pub mod error;
pub mod io;
pub mod population;
pub mod tracker;

pub mod dump;
pub mod reset;
pub mod simulate;

pub mod blackout;
pub mod booking;
pub mod catalog;
pub mod profile;

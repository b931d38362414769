pub mod booking;
pub mod seat;
pub mod trip;

pub mod permit;
pub mod reservation;
pub mod space;

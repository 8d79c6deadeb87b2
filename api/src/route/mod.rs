pub mod health;
pub mod permit;
pub mod reservation;
pub mod space;
pub mod v1;

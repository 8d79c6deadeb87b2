pub mod conflict;
pub mod footprint;
pub mod geo;
pub mod id;
pub mod permit;
pub mod reservation;
pub mod space;
pub mod window;

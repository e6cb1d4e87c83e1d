pub mod controller;
pub mod router;
pub mod service;

pub use router::init_bookings_router;
pub use service::BookingService;

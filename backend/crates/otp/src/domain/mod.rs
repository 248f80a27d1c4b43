pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entities::OtpChallenge;
pub use value_objects::{ContactDetails, DeliveryMethod, Destination, OtpCode};

//! Value Object Module

pub mod email;
pub mod person_name;
pub mod phone_number;
pub mod user_name;
pub mod user_password;
pub mod user_role;

pub use email::Email;
pub use kernel::id::{PatientId, UserId};
pub use person_name::PersonName;
pub use phone_number::PhoneNumber;
pub use user_name::UserName;
pub use user_password::{LoginPassword, RawPassword, UserPassword};
pub use user_role::UserRole;

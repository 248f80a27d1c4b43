pub mod memory;
pub mod notifier;
pub mod postgres;

pub use memory::MemoryOtpRepository;
pub use notifier::ChannelNotifier;
pub use postgres::PgOtpRepository;

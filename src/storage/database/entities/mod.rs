/// Provider health record entity module
pub mod health_record;
/// Usage event entity module
pub mod usage_event;

pub use health_record::Entity as HealthRecord;
pub use usage_event::Entity as UsageEvent;

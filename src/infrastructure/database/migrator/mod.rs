//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250115_000001_create_users;
mod m20250115_000002_create_events;
mod m20250115_000003_create_attendees;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250115_000001_create_users::Migration),
            Box::new(m20250115_000002_create_events::Migration),
            Box::new(m20250115_000003_create_attendees::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

mod m20250301_catalog;
mod m20250302_add_users;
mod m20250315_add_binders_and_listings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_catalog::Migration),
            Box::new(m20250302_add_users::Migration),
            Box::new(m20250315_add_binders_and_listings::Migration),
        ]
    }
}

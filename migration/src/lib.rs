pub use sea_orm_migration::prelude::*;

mod m20250301_000001_baseline_migration;
mod m20250412_000002_add_cost_and_review_rating;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_baseline_migration::Migration),
            Box::new(m20250412_000002_add_cost_and_review_rating::Migration),
        ]
    }
}

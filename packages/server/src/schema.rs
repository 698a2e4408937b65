use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityName, EntityTrait, Schema};
use tracing::{info, warn};

use crate::entity::{genre, problem, result, user};

/// Create the four tables if they are missing.
///
/// Parents come before children so the foreign keys on `problems` and
/// `results` can be declared inline (SQLite cannot add them afterwards).
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, genre::Entity).await?;
    create_table(db, &schema, problem::Entity).await?;
    create_table(db, &schema, result::Entity).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();

    let backend = db.get_database_backend();
    db.execute_raw(backend.build(&stmt)).await?;

    info!(table = entity.table_name(), "Ensured table exists");
    Ok(())
}

/// Ensure the indexes used by the listing queries exist.
///
/// MySQL has no `IF NOT EXISTS` for indexes, so on an existing database the
/// duplicate is reported as a warning and startup continues.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // ORDER BY created_at DESC, id DESC LIMIT 30
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_problems_created_at")
        .table(problem::Entity)
        .col(problem::Column::CreatedAt)
        .col(problem::Column::Id)
        .to_owned();

    let backend = db.get_database_backend();
    match db.execute_raw(backend.build(&stmt)).await {
        Ok(_) => {
            info!("Ensured index idx_problems_created_at exists");
        }
        Err(e) => {
            warn!("Failed to create index idx_problems_created_at: {}", e);
        }
    }

    Ok(())
}

use gentleman_common::connect_to_database;

use crate::settings::Settings;

mod schema;
mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let database = connect_to_database(&settings.database).await?;
    println!("Connected to DB");

    database
        .execute_in_transaction(schema::statements(), "document store migration")
        .await?;
    println!("Schema migrated");

    Ok(())
}

use clap::{Parser, Subcommand, ValueEnum};
use migration::{migrate, MigrationCommand};
use wordsense_backend::config::db::DbKind;
use wordsense_backend::infra::db::connect_db;
use wordsense_backend::infra::seed::seed_catalog;
use wordsense_backend::AppError;

/// In-memory SQLite is deliberately absent: the database would vanish when
/// the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Drop all tables and reapply every migration
    Fresh,
    /// Roll back every migration
    Reset,
    /// Roll back then reapply every migration
    Refresh,
    /// Show applied and pending migrations
    Status,
    /// Apply pending migrations, then load the fixture catalog if cards is empty
    Seed,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Word Sense database migration tool")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Target database; connection details come from the environment
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

async fn run(args: Args) -> Result<(), AppError> {
    let conn = connect_db(args.db.into()).await?;

    let command = match args.command {
        Command::Up => MigrationCommand::Up,
        Command::Down => MigrationCommand::Down,
        Command::Fresh => MigrationCommand::Fresh,
        Command::Reset => MigrationCommand::Reset,
        Command::Refresh => MigrationCommand::Refresh,
        Command::Status => MigrationCommand::Status,
        Command::Seed => {
            migrate(&conn, MigrationCommand::Up).await?;
            let inserted = seed_catalog(&conn).await?;
            tracing::info!(inserted, "seed complete");
            return Ok(());
        }
    };

    migrate(&conn, command).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,wordsense_backend=info,sqlx=warn")
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

use clap::Parser;
use lakeglue::config::WarehouseConfig;
use lakeglue::infra::warehouse::ParquetWarehouse;
use lakeglue::jobs::projection::{run_projection, ProjectionParams};
use lakeglue::logging;
use tracing::{error, info};

/// Reads a managed table, keeps the named columns in order, and writes the
/// result as a new managed table, replacing any existing one.
#[derive(Parser)]
#[command(name = "table-projection")]
#[command(about = "Project a column subset of a managed table into a new table")]
struct Cli {
    /// Database of the source table
    source_database: String,
    /// Source table name
    source_table: String,
    /// Database for the destination table
    dest_database: String,
    /// Destination table name
    dest_table: String,
    /// Comma-separated list of columns to keep, in output order
    columns: String,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    let params = ProjectionParams {
        source_database: cli.source_database,
        source_table: cli.source_table,
        dest_database: cli.dest_database,
        dest_table: cli.dest_table,
        columns: ProjectionParams::parse_columns(&cli.columns),
    };

    let config = WarehouseConfig::from_env();
    let catalog = ParquetWarehouse::new(config.root);

    match run_projection(&catalog, &params).await {
        Ok(summary) => {
            info!(
                source = %summary.source,
                destination = %summary.destination,
                columns = summary.columns,
                "projection job finished"
            );
        }
        Err(e) => {
            error!("projection job failed: {e}");
            std::process::exit(1);
        }
    }
}

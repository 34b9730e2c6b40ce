use crate::error::Result;
use crate::ports::TableCatalog;
use tracing::{info, instrument};

/// Arguments of one projection run, resolved from the job CLI.
#[derive(Debug, Clone)]
pub struct ProjectionParams {
    pub source_database: String,
    pub source_table: String,
    pub dest_database: String,
    pub dest_table: String,
    /// Columns to keep, in output order.
    pub columns: Vec<String>,
}

impl ProjectionParams {
    /// Splits the CLI's comma-separated column list.
    pub fn parse_columns(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|column| column.trim().to_string())
            .filter(|column| !column.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProjectionSummary {
    pub source: String,
    pub destination: String,
    pub columns: usize,
}

/// Table Projection Job: reads the full source table, keeps exactly the
/// requested columns in the requested order, and overwrites the destination
/// table with the result. Column names the source schema lacks surface as
/// the query engine's own error.
#[instrument(skip(catalog))]
pub async fn run_projection(
    catalog: &dyn TableCatalog,
    params: &ProjectionParams,
) -> Result<ProjectionSummary> {
    let source = format!("{}.{}", params.source_database, params.source_table);
    let destination = format!("{}.{}", params.dest_database, params.dest_table);

    info!(%source, "reading source table");
    let frame = catalog
        .read_table(&params.source_database, &params.source_table)
        .await?;
    info!(schema = ?frame.schema(), "source schema");

    let columns: Vec<&str> = params.columns.iter().map(String::as_str).collect();
    info!(columns = ?params.columns, "projecting columns");
    let projected = frame.select_columns(&columns)?;
    info!(schema = ?projected.schema(), "projected schema");

    info!(%destination, "writing destination table");
    catalog
        .write_table(&params.dest_database, &params.dest_table, projected)
        .await?;
    info!("projection complete");

    Ok(ProjectionSummary {
        source,
        destination,
        columns: params.columns.len(),
    })
}

use crate::error::Result;
use crate::ports::TableCatalog;
use async_trait::async_trait;
use datafusion::dataframe::DataFrameWriteOptions;
use datafusion::prelude::{DataFrame, ParquetReadOptions, SessionContext};
use std::fs;
use std::path::{Path, PathBuf};

/// Table catalog over a Parquet warehouse: a managed table named
/// `database.table` lives at `<root>/<database>/<table>`.
pub struct ParquetWarehouse {
    ctx: SessionContext,
    root: PathBuf,
}

impl ParquetWarehouse {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            ctx: SessionContext::new(),
            root: root.into(),
        }
    }

    fn table_path(&self, database: &str, table: &str) -> PathBuf {
        self.root.join(database).join(table)
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[async_trait]
impl TableCatalog for ParquetWarehouse {
    async fn read_table(&self, database: &str, table: &str) -> Result<DataFrame> {
        let path = self.table_path(database, table);
        let frame = self
            .ctx
            .read_parquet(path_str(&path), ParquetReadOptions::default())
            .await?;
        Ok(frame)
    }

    async fn write_table(&self, database: &str, table: &str, frame: DataFrame) -> Result<()> {
        let path = self.table_path(database, table);
        // Full-table overwrite: drop whatever is there before writing.
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        frame
            .write_parquet(&path_str(&path), DataFrameWriteOptions::new(), None)
            .await?;
        Ok(())
    }
}

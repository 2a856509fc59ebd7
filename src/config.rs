use std::path::PathBuf;

/// Where and how to read the two startup tables.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Directory holding both CSV files
    pub data_dir: PathBuf,
    /// Inventory file name, relative to `data_dir`
    pub inventory_file: String,
    /// Price ticker file name, relative to `data_dir`
    pub ticker_file: String,
    /// strftime format of the `timestamp` column in both files
    pub timestamp_format: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            inventory_file: "inventory_dataframe.csv".to_string(),
            ticker_file: "ticker.csv".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn ticker_path(&self) -> PathBuf {
        self.data_dir.join(&self.ticker_file)
    }
}

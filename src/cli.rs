use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore used-vehicle listings", long_about = None)]
pub struct Cli {
    /// Listing file to open (CSV, JSON or Parquet); overrides the config
    pub data: Option<PathBuf>,
    /// JSON file with dashboard settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_and_config_are_optional() {
        let cli = Cli::try_parse_from(["listing-lens"]).expect("parse");
        assert!(cli.data.is_none() && cli.config.is_none());

        let cli = Cli::try_parse_from(["listing-lens", "cars.csv", "--config", "lens.json"])
            .expect("parse");
        assert_eq!(cli.data, Some(PathBuf::from("cars.csv")));
        assert_eq!(cli.config, Some(PathBuf::from("lens.json")));
    }
}

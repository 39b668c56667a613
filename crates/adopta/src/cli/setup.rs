use adoptaapp::model::EntityId;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Pets,
    Products,
}

impl CatalogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Pets => "pets",
            CatalogKind::Products => "products",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adopta", bin_name = "adopta", version, disable_help_subcommand = true)]
#[command(about = "Browse, filter and favorite adoptable pets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file (JSON array of pets or products)
    #[arg(long, global = true, help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Favorites file (JSON array of IDs)
    #[arg(long, global = true, help_heading = "Options")]
    pub favorites: Option<PathBuf>,

    /// What the catalog holds
    #[arg(long, global = true, value_enum, help_heading = "Options")]
    pub kind: Option<CatalogKind>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog entries matching the filters
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Filter as key=value (e.g. species=dog, ageYears=joven); repeatable
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Free-text search term
        #[arg(short, long)]
        search: Option<String>,

        /// Only show favorited entries
        #[arg(long)]
        favorites_only: bool,

        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show the filter options the catalog offers
    #[command(display_order = 2)]
    Facets {
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Manage favorites
    #[command(alias = "f", display_order = 3)]
    Fav {
        #[command(subcommand)]
        action: FavCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// List favorited catalog entries
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Add the entry if it is not a favorite, remove it if it is
    Toggle { id: EntityId },
    /// Add an entry to favorites
    Add { id: EntityId },
    /// Remove an entry from favorites
    #[command(alias = "rm")]
    Remove { id: EntityId },
}

/// Parse `key=value`. The value may itself contain `=`.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_filter_splits_on_first_equals() {
        assert_eq!(
            parse_filter("species=dog"),
            Ok(("species".to_string(), "dog".to_string()))
        );
        assert_eq!(
            parse_filter("searchTerm=a=b"),
            Ok(("searchTerm".to_string(), "a=b".to_string()))
        );
        assert!(parse_filter("species").is_err());
        assert!(parse_filter("=dog").is_err());
    }

    #[test]
    fn list_collects_repeated_filters() {
        let cli = Cli::parse_from([
            "adopta", "list", "-f", "species=dog", "--filter", "ageYears=adulto", "--output",
            "json",
        ]);
        match cli.command {
            Some(Commands::List {
                filters, output, ..
            }) => {
                assert_eq!(filters.len(), 2);
                assert_eq!(filters[1].0, "ageYears");
                assert_eq!(output, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["adopta", "fav", "toggle", "3", "--kind", "products", "-v"]);
        assert_eq!(cli.kind, Some(CatalogKind::Products));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Fav {
                action: FavCommands::Toggle { id: 3 }
            })
        ));
    }
}

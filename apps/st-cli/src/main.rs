use clap::{Parser, Subcommand};
use st_catalog::CatalogStore;
use st_table::{TableData, TableSpec, build_table, spec, write_table};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "st-cli")]
#[command(about = "StarTab CLI - measurement catalogs to deluxetable bodies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a table spec file
    Validate {
        /// Path to the table spec YAML file
        spec_path: PathBuf,
    },
    /// Show one catalog entry with its errors and reference
    Show {
        /// Path to the catalog directory
        catalog_dir: PathBuf,
        /// Row identifier (e.g. star name)
        row: String,
        /// Column name
        col: String,
    },
    /// Export catalog columns as a deluxetable body
    Export {
        /// Path to the catalog directory
        catalog_dir: PathBuf,
        /// Table spec YAML file (defaults apply when omitted)
        #[arg(short, long)]
        spec: Option<PathBuf>,
        /// Columns to export, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
        /// Output .tex file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Archive a timestamped copy of a catalog
    Backup {
        /// Path to the catalog directory
        catalog_dir: PathBuf,
    },
    /// List archived copies of a catalog
    Archives {
        /// Path to the catalog directory
        catalog_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { spec_path } => cmd_validate(&spec_path),
        Commands::Show {
            catalog_dir,
            row,
            col,
        } => cmd_show(&catalog_dir, &row, &col),
        Commands::Export {
            catalog_dir,
            spec,
            columns,
            output,
        } => cmd_export(&catalog_dir, spec.as_deref(), columns, output.as_deref()),
        Commands::Backup { catalog_dir } => cmd_backup(&catalog_dir),
        Commands::Archives { catalog_dir } => cmd_archives(&catalog_dir),
    }
}

fn cmd_validate(spec_path: &Path) -> Result<(), Box<dyn Error>> {
    println!("Validating table spec: {}", spec_path.display());
    let table_spec = spec::load_yaml(spec_path)?;
    println!("✓ Spec is valid");
    println!("  Error figures: {}", table_spec.sig_figs_err);
    println!("  Columns with formats: {}", table_spec.formats.len());
    Ok(())
}

fn cmd_show(catalog_dir: &Path, row: &str, col: &str) -> Result<(), Box<dyn Error>> {
    let catalog = CatalogStore::open(catalog_dir)?.load()?;
    println!("{}", catalog.display_entry(row, col)?);
    Ok(())
}

fn cmd_export(
    catalog_dir: &Path,
    spec_path: Option<&Path>,
    columns: Option<Vec<String>>,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let catalog = CatalogStore::open(catalog_dir)?.load()?;
    let table_spec = match spec_path {
        Some(path) => spec::load_yaml(path)?,
        None => TableSpec::default(),
    };
    let columns = columns.unwrap_or_else(|| catalog.columns.clone());

    let (cells, refkeys) = catalog.table_columns(&columns)?;
    let data = TableData {
        cells,
        notes: None,
        refkeys: Some(refkeys),
    };
    let body = build_table(&data, &table_spec)?;

    if let Some(path) = output {
        write_table(path, &body)?;
        println!(
            "✓ Exported {} rows x {} columns to {}",
            catalog.nrows(),
            columns.len(),
            path.display()
        );
    } else {
        print!("{}", body);
    }
    Ok(())
}

fn cmd_backup(catalog_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = CatalogStore::open(catalog_dir)?;
    let catalog = store.load()?;
    match store.backup(&catalog)? {
        Some(stamp) => println!("✓ Archived as {}", stamp),
        None => println!("✓ Latest archive is already current"),
    }
    Ok(())
}

fn cmd_archives(catalog_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = CatalogStore::open(catalog_dir)?;
    let stamps = store.list_archives()?;
    if stamps.is_empty() {
        println!("No archives found");
    } else {
        println!("Archives:");
        for stamp in stamps {
            println!("  {}", stamp);
        }
    }
    Ok(())
}

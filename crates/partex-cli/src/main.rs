use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use partex_partition::{EnvironmentRegistry, PartitionMap, PartitionScanner, Token};
use partex_select::{PairMatcher, SelectionResolver};

#[derive(Parser)]
#[command(name = "partex")]
#[command(about = "Partex partition tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a TeX file and emit the token stream as JSON
    Partition {
        /// Path to the .tex file
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Treat a lone $ as literal text (template placeholder syntax)
        #[arg(long)]
        template_mode: bool,
    },
    /// Resolve the double-click selection at a byte offset
    Select {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(value_name = "OFFSET")]
        offset: usize,
        #[arg(long)]
        template_mode: bool,
    },
    /// Find the matching bracket for the one at a byte offset
    Match {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(value_name = "OFFSET")]
        offset: usize,
        #[arg(long)]
        template_mode: bool,
    },
}

fn scan(path: &PathBuf, template_mode: bool) -> anyhow::Result<(String, PartitionMap)> {
    let content = fs::read_to_string(path)?;
    let scanner =
        PartitionScanner::new(EnvironmentRegistry::latex_defaults()).template_mode(template_mode);
    let map = PartitionMap::build(&scanner, &content);
    Ok((content, map))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Partition {
            path,
            template_mode,
        } => {
            let content = fs::read_to_string(path)?;
            let scanner = PartitionScanner::new(EnvironmentRegistry::latex_defaults())
                .template_mode(*template_mode);
            let tokens: Vec<Token> = scanner.scan_document(&content).collect();
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Commands::Select {
            path,
            offset,
            template_mode,
        } => {
            let (content, map) = scan(path, *template_mode)?;
            let selection = SelectionResolver::new(&content, &map).resolve(*offset);
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        Commands::Match {
            path,
            offset,
            template_mode,
        } => {
            let (content, map) = scan(path, *template_mode)?;
            let matched = PairMatcher::new(&content, &map).match_at(*offset);
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }
    }
    Ok(())
}

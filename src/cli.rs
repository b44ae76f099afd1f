//! Command-line interface for the extractor.

use clap::{Parser, Subcommand};
use console::style;

use crate::consolidator::ConsolidateOptions;
use crate::error::Result;
use crate::extractor::{response_json, Extractor, ExtractorConfig};

/// lexcite - Extract statutory citations from law.go.kr article pages.
#[derive(Parser)]
#[command(name = "lexcite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract citations from one statute article.
    Extract {
        /// MST of the statute (법령일련번호, e.g. 268611)
        master_id: String,

        /// Statute display name (법령명, e.g. 신탁법)
        #[arg(short, long)]
        name: String,

        /// Article number (조번호)
        #[arg(short, long)]
        article: u32,

        /// Article branch number (조가지번호, 제37조의2 → 2)
        #[arg(short, long, default_value_t = 0)]
        branch: u32,

        /// Print the raw JSON envelope instead of a summary
        #[arg(long)]
        json: bool,

        /// Emit law-name-only mentions as citations
        #[arg(long)]
        include_bare_mentions: bool,

        /// Expand 부터…까지 article ranges into one citation per article
        #[arg(long)]
        expand_ranges: bool,

        /// Override the upstream base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            master_id,
            name,
            article,
            branch,
            json,
            include_bare_mentions,
            expand_ranges,
            base_url,
        } => {
            let mut config = ExtractorConfig {
                options: ConsolidateOptions {
                    include_bare_law_mentions: include_bare_mentions,
                    expand_ranges,
                },
                ..Default::default()
            };
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            extract_command(config, &master_id, &name, article, branch, json)
        }
    }
}

/// Execute the extract command.
fn extract_command(
    config: ExtractorConfig,
    master_id: &str,
    name: &str,
    article: u32,
    branch: u32,
    json: bool,
) -> Result<()> {
    let mut extractor = Extractor::new(config)?;
    let outcome = extractor.extract(master_id, name, article, branch);

    if json {
        // The envelope is the machine contract: failures are reported
        // inside it, not as a process error
        println!("{}", response_json(&outcome));
        return Ok(());
    }

    let result = outcome?;

    println!(
        "{} {} {}",
        style("Citations of").bold(),
        style(&result.statute.display_name).cyan(),
        style(result.article.display()).green()
    );
    println!(
        "  {} total ({} internal, {} external)",
        result.citations.len(),
        result.internal_count,
        result.external_count
    );
    println!();

    for citation in &result.citations {
        let target = match (&citation.target_law_name, citation.target_article) {
            (Some(law), Some(article)) => format!("{law} 제{article}조"),
            (Some(law), None) => law.clone(),
            (None, Some(article)) => format!("제{article}조"),
            (None, None) => String::new(),
        };
        println!(
            "  [{}] {} {}",
            style(citation.kind.as_str()).yellow(),
            style(target).bold(),
            style(&citation.raw_text).dim()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from([
            "lexcite", "extract", "268611", "--name", "신탁법", "--article", "3",
        ]);

        let Commands::Extract {
            master_id,
            name,
            article,
            branch,
            json,
            ..
        } = cli.command;
        assert_eq!(master_id, "268611");
        assert_eq!(name, "신탁법");
        assert_eq!(article, 3);
        assert_eq!(branch, 0);
        assert!(!json);
    }

    #[test]
    fn test_cli_parse_extract_with_branch_and_flags() {
        let cli = Cli::parse_from([
            "lexcite",
            "extract",
            "268611",
            "--name",
            "신탁법",
            "--article",
            "37",
            "--branch",
            "2",
            "--json",
            "--expand-ranges",
        ]);

        let Commands::Extract {
            article,
            branch,
            json,
            expand_ranges,
            include_bare_mentions,
            ..
        } = cli.command;
        assert_eq!(article, 37);
        assert_eq!(branch, 2);
        assert!(json);
        assert!(expand_ranges);
        assert!(!include_bare_mentions);
    }
}

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use david_annot::aggregate::common_annotations;
use david_annot::client::DavidClient;
use david_annot::config::{ConfigLoader, ResolvedConfig, normalize_annotations};
use david_annot::domain::SpeciesFilter;
use david_annot::error::DavidError;
use david_annot::output::JsonOutput;
use david_annot::transport::HttpTransport;

#[derive(Parser)]
#[command(name = "david-annot")]
#[command(about = "Fetch functional annotations for gene lists from the DAVID service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Per-gene annotation table (annotationReport)")]
    Annotate(QueryArgs),
    #[command(about = "Term clustering table (term2term)")]
    Clusters(QueryArgs),
    #[command(about = "Full per-gene report (geneReportFull)")]
    Report(QueryArgs),
    #[command(about = "Annotation terms shared by every gene")]
    Common(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Gene identifiers, separated by spaces or commas
    #[arg(required = true)]
    genes: Vec<String>,

    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    species: Option<String>,

    #[arg(long)]
    id_type: Option<String>,

    /// Annotation categories, comma separated
    #[arg(long, value_delimiter = ',')]
    annot: Option<Vec<String>>,
}

impl QueryArgs {
    fn gene_list(&self) -> Vec<String> {
        self.genes
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|gene| !gene.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn resolve_config(&self) -> Result<ResolvedConfig, DavidError> {
        let mut config = ConfigLoader::resolve(self.config.as_deref())?;
        if let Some(species) = &self.species {
            config.species = SpeciesFilter::new(species.clone());
        }
        if let Some(id_type) = &self.id_type {
            config.id_type = id_type.parse()?;
        }
        if let Some(annot) = &self.annot {
            config.annotations = normalize_annotations(annot.clone());
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<DavidError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DavidError) -> u8 {
    match error {
        DavidError::QueryTooLong { .. }
        | DavidError::InvalidTool(_)
        | DavidError::InvalidIdType(_)
        | DavidError::InvalidBaseUrl(_)
        | DavidError::ConfigRead(_)
        | DavidError::ConfigParse(_) => 2,
        DavidError::Transport(_)
        | DavidError::TransportStatus { .. }
        | DavidError::NoScriptContent
        | DavidError::NoForm
        | DavidError::DownloadLinkNotFound
        | DavidError::MalformedHeader(_) => 3,
        DavidError::Output(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Annotate(args) => {
            let (client, genes) = connect(&args)?;
            let table = client.annotation_report(&genes)?;
            JsonOutput::print_annotations(&table).map_err(output_error)?;
        }
        Commands::Clusters(args) => {
            let (client, genes) = connect(&args)?;
            let table = client.term_clusters(&genes)?;
            JsonOutput::print_clusters(&table).map_err(output_error)?;
        }
        Commands::Report(args) => {
            let (client, genes) = connect(&args)?;
            let report = client.gene_report(&genes)?;
            JsonOutput::print_gene_report(&report).map_err(output_error)?;
        }
        Commands::Common(args) => {
            let (client, genes) = connect(&args)?;
            let table = client.annotation_report(&genes)?;
            let common = common_annotations(&table.genes);
            JsonOutput::print_common(&common).map_err(output_error)?;
        }
    }
    Ok(())
}

fn connect(args: &QueryArgs) -> miette::Result<(DavidClient<HttpTransport>, Vec<String>)> {
    let config = args.resolve_config()?;
    let transport = HttpTransport::new(&config)?;
    let genes = args.gene_list();
    if genes.is_empty() {
        return Err(miette::Report::msg("no gene identifiers given"));
    }
    Ok((DavidClient::new(transport, config), genes))
}

fn output_error(err: std::io::Error) -> DavidError {
    DavidError::Output(err.to_string())
}

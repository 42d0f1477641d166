use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use xmldoc_lsp::{Backend, Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Completion for extended XML documentation comments")]
struct Cli {
    /// Log filter (e.g. `debug` or `xmldoc_lsp=trace`).  Overrides
    /// XMLDOC_LSP_LOG and RUST_LOG.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Do not open completion when the first letter of a word is typed
    #[arg(long)]
    no_trigger_on_letters: bool,
}

fn initialize_logging(cli: &Cli) {
    let filter = cli
        .log_level
        .as_deref()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_env("XMLDOC_LSP_LOG").ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    // stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logging(&cli);

    let base_config = Config {
        trigger_on_typing_letters: !cli.no_trigger_on_letters,
    };

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(|client| Backend::new(client).with_base_config(base_config));

    Server::new(stdin, stdout, socket).serve(service).await;
}

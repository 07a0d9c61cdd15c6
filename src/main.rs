use anyhow::Result;
use clap::Parser;

use gql_demo::cli::handlers::{self, CommandContext};
use gql_demo::cli::{Cli, Commands};
use gql_demo::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    match cli.command {
        Commands::Init { sample, force } => handlers::handle_init(sample, force),
        Commands::Serve { host, port } => {
            let ctx = CommandContext::load(cli.config.as_deref())?;
            handlers::handle_serve(ctx, host, port)
        }
        Commands::Query {
            query,
            service,
            variables,
        } => {
            let ctx = CommandContext::load(cli.config.as_deref())?;
            handlers::handle_query(ctx, service.into(), query, variables)
        }
        Commands::Mutate {
            mutation,
            service,
            variables,
        } => {
            let ctx = CommandContext::load(cli.config.as_deref())?;
            handlers::handle_mutate(ctx, service.into(), mutation, variables)
        }
    }
}

use anyhow::Result;
use colored::Colorize;

use crate::graphql::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or(ctx.config.server.host);
    let port = port.unwrap_or(ctx.config.server.port);

    println!(
        "{} on http://{}:{}",
        "Starting GraphQL server".green(),
        host,
        port
    );
    println!("  Library:  http://{}:{}/graphql", host, port);
    println!("  Person:   http://{}:{}/person", host, port);
    println!("  GraphiQL: http://{}:{}/", host, port);

    tokio::runtime::Runtime::new()?
        .block_on(async { run_server(ctx.state, &host, port).await })?;
    Ok(())
}

use crate::graphql::{Service, parse_variables};
use anyhow::Result;

use super::CommandContext;

pub fn handle_query(
    ctx: CommandContext,
    service: Service,
    query: String,
    variables: Option<String>,
) -> Result<()> {
    execute(ctx, service, query, variables)
}

pub fn handle_mutate(
    ctx: CommandContext,
    service: Service,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    // Auto-wrap in mutation { }
    let query = format!("mutation {{ {} }}", mutation);
    execute(ctx, service, query, variables)
}

fn execute(
    ctx: CommandContext,
    service: Service,
    query: String,
    variables: Option<String>,
) -> Result<()> {
    let vars = parse_variables(variables.as_deref())?;
    let request = async_graphql::Request::new(query).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(ctx.state.execute(service, request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

use crate::graphql::Service;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gql-demo")]
#[command(
    author,
    version,
    about = "Demo GraphQL services over in-memory data with batched relation loading"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .gql-demo.yml by default)
    #[arg(long, global = true, env = "GQL_DEMO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a .gql-demo.yml config file in the current directory
    Init {
        /// Include sample books, authors and persons as seed data
        #[arg(long)]
        sample: bool,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Execute a GraphQL query against the seeded stores
    Query {
        /// GraphQL query string
        query: String,

        /// Service to query
        #[arg(short, long, value_enum, default_value = "library")]
        service: ServiceArg,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Service to mutate
        #[arg(short, long, value_enum, default_value = "library")]
        service: ServiceArg,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ServiceArg {
    Library,
    Person,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Library => Service::Library,
            ServiceArg::Person => Service::Person,
        }
    }
}

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::demo::demo_engine;
use crate::engine::Engine;
use crate::logging::init_logging;
use crate::router::MatchPolicy;
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for trierouter
///
/// Serves the demo application or inspects its route table.
#[derive(Parser)]
#[command(name = "trierouter")]
#[command(about = "trierouter CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the demo server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0:9999")]
        addr: String,

        /// Sibling match policy (overrides TRIER_MATCH_POLICY)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// List the demo routes
    Routes {
        /// Sibling match policy (overrides TRIER_MATCH_POLICY)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// Resolve one request against the demo routes
    Resolve {
        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /hello/geektutu
        path: String,

        /// Sibling match policy (overrides TRIER_MATCH_POLICY)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
}

/// `--policy` values
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// First registered sibling wins
    InsertionOrder,
    /// Literal siblings are tried before wildcards
    StaticFirst,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::InsertionOrder => MatchPolicy::InsertionOrder,
            PolicyArg::StaticFirst => MatchPolicy::StaticFirst,
        }
    }
}

fn effective_policy(arg: Option<PolicyArg>, config: &RuntimeConfig) -> MatchPolicy {
    arg.map_or(config.match_policy, MatchPolicy::from)
}

/// One `METHOD PATTERN` line per registered route.
pub(crate) fn format_routes(engine: &Engine) -> String {
    engine
        .routes()
        .routes()
        .into_iter()
        .map(|(method, pattern)| format!("{method:<7} {pattern}\n"))
        .collect()
}

/// Human-readable outcome of resolving `method path`.
pub(crate) fn format_resolution(engine: &Engine, method: &str, path: &str) -> String {
    match engine.routes().resolve(method, path) {
        Some(m) => {
            let params: String = m
                .params
                .iter()
                .map(|(name, value)| format!(" {name}={value}"))
                .collect();
            format!("{method} {path} -> {}{params}", m.pattern)
        }
        None => format!("{method} {path} -> 404 NOT FOUND"),
    }
}

/// Parse arguments from the process and run the selected command.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the server fails to
/// start.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already-parsed command line.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RuntimeConfig::from_env();
    match cli.command {
        Commands::Serve { addr, policy } => {
            init_logging().context("failed to initialize logging")?;
            config.apply();
            let policy = effective_policy(policy, &config);
            info!(
                addr = %addr,
                policy = policy.as_str(),
                stack_size = config.stack_size,
                "Starting trierouter demo"
            );
            demo_engine(policy).run(&addr)
        }
        Commands::Routes { policy } => {
            let engine = demo_engine(effective_policy(policy, &config));
            print!("{}", format_routes(&engine));
            Ok(())
        }
        Commands::Resolve {
            method,
            path,
            policy,
        } => {
            let engine = demo_engine(effective_policy(policy, &config));
            println!("{}", format_resolution(&engine, &method, &path));
            Ok(())
        }
    }
}

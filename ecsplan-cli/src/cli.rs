use clap::{Args as ClapArgs, Parser, Subcommand};

/// ecsplan - declarative ECS web-service topology builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

/// Input parameters, shared by every subcommand. Flags take precedence over
/// the `ECSPLAN_*` environment context.
#[derive(ClapArgs, Debug, Default)]
pub struct ParameterArgs {
    /// Application name; seeds every derived resource name
    #[arg(long)]
    pub app_name: Option<String>,

    /// Container port the application listens on (default: 8080)
    #[arg(long)]
    pub container_port: Option<i64>,

    /// Desired replica count (default: 1)
    #[arg(long)]
    pub desired_count: Option<i64>,

    /// Fargate CPU units (default: 512)
    #[arg(long)]
    pub cpu: Option<i64>,

    /// Fargate memory in MiB (default: 1024)
    #[arg(long)]
    pub memory_mib: Option<i64>,

    /// Serve the application image instead of the public bootstrap image
    #[arg(long)]
    pub no_bootstrap: bool,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Derive the topology and print the full specification graph
    Synth {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        output: String,
    },

    /// Derive the topology and print its addressable outputs
    Outputs {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Validate parameters and the derived graph without printing it
    Check {
        #[command(flatten)]
        params: ParameterArgs,
    },
}

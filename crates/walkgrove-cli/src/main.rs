use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "walkgrove-cli", version, about = "Walkgrove CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily step progress
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Growing tree and tree catalog
    Tree {
        #[command(subcommand)]
        action: commands::tree::TreeAction,
    },
    /// Streak and badges
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Garden management
    Garden {
        #[command(subcommand)]
        action: commands::garden::GardenAction,
    },
    /// Activity statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Trade completed gardens for real-world tree planting
    Redeem {
        #[command(subcommand)]
        action: commands::redeem::RedeemAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Tree { action } => commands::tree::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Garden { action } => commands::garden::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Redeem { action } => commands::redeem::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "walkgrove-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

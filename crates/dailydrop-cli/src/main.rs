use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "dailydrop", version, about = "DailyDrop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily reward status and claiming
    Daily {
        #[command(subcommand)]
        action: commands::daily::DailyAction,
    },
    /// Player wallet
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Shop purchases and coin bundles
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Challenge progress and claims
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// Claim statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Daily { action } => commands::daily::run(action),
        Commands::Wallet { action } => commands::wallet::run(action),
        Commands::Shop { action } => commands::shop::run(action),
        Commands::Challenge { action } => commands::challenge::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "dailydrop",
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

//! Omnikit CLI - run agent actions from the command line.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use omnikit::prelude::*;
use omnikit_cli::{default_actions, render_actions, tools};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Omnikit CLI - plugin-driven EVM actions as LLM tools
#[derive(Parser, Debug)]
#[command(name = "omnikit")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the OpenAI-style tool array handed to the model
    Tools,
    /// List actions with their similes, descriptions and examples
    Actions,
    /// Execute one tool call and print the action result
    Call {
        /// Action (tool) name, e.g. ERC20_TRANSFER
        name: String,
        /// Tool arguments as a JSON object
        #[arg(default_value = "{}")]
        input: String,
        #[command(flatten)]
        wallet: WalletArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct WalletArgs {
    /// JSON-RPC endpoint URL
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Private key (hex)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, conflicts_with = "mnemonic")]
    private_key: Option<String>,

    /// BIP39 mnemonic phrase
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    /// HD derivation index
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Chain ID (queried from the node if omitted)
    #[arg(long, env = "CHAIN_ID")]
    chain_id: Option<u64>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("omnikit=debug,omnikit_cli=debug")
    } else {
        EnvFilter::new("omnikit=info,omnikit_cli=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn build_agent(args: WalletArgs) -> anyhow::Result<Agent> {
    let mut builder = EvmWallet::builder()
        .rpc_url(args.rpc_url)
        .index(args.index);
    if let Some(key) = args.private_key {
        builder = builder.private_key(key);
    }
    if let Some(mnemonic) = args.mnemonic {
        builder = builder.mnemonic(mnemonic);
    }
    if let Some(chain_id) = args.chain_id {
        builder = builder.chain_id(chain_id);
    }

    let wallet = builder.build().await.context("failed to build wallet")?;
    let connection: Arc<dyn Connection> = Arc::new(wallet.connection());
    let config = AgentConfig::from_env()?;
    let context = AgentContext::new(Arc::clone(&connection), Arc::new(wallet), config)
        .with_resolver(Arc::new(EnsResolver::new(connection)));

    Ok(agent_builder(context)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Tools => {
            let set = tools(&default_actions());
            println!("{}", serde_json::to_string_pretty(&set.to_openai_tools())?);
        }
        Command::Actions => {
            print!("{}", render_actions(&default_actions()));
        }
        Command::Call {
            name,
            input,
            wallet,
        } => {
            let input: Value =
                serde_json::from_str(&input).context("tool arguments must be valid JSON")?;
            let agent = build_agent(wallet).await?;
            info!(action = %name, "executing tool call");

            let result = agent.execute(&name, input).await;
            println!("{}", serde_json::to_string_pretty(&result.to_value())?);
            if !result.is_success() {
                anyhow::bail!("{}", result.message());
            }
        }
    }

    Ok(())
}

use clap::Parser;
use hub::cli::{
    handle_completions, handle_config_init, handle_config_validate, handle_servers,
    handle_simulate, load_config, Cli, Commands, ConfigCommands,
};
use hub::logging::init_tracing;

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Simulate(args) => {
            let config = load_config(&args.config, args.log_level.as_deref())?;
            init_tracing(&config.logging)?;
            println!("{}", handle_simulate(&args, config).await?);
        }
        Commands::Servers(args) => {
            let config = load_config(&args.config, None)?;
            println!("{}", handle_servers(&args, &config)?);
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args)?,
            ConfigCommands::Validate(args) => println!("{}", handle_config_validate(&args)?),
        },
        Commands::Completions(args) => handle_completions(&args),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tasklist::cli::{Cli, Commands};
use tasklist::config::Config;
use tasklist::ui::run_tui;
use tasklist::{logging, Gateway};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.db, cli.log_file);

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    logging::init(interactive.then_some(config.log_path.as_path()))?;

    match cli.command {
        Some(Commands::Add { text }) => {
            let gateway = open(&config).await?;
            let task = gateway.insert(&text).await?;
            println!("{}", task.id);
        }
        Some(Commands::List) => {
            let gateway = open(&config).await?;
            for task in gateway.list_all().await? {
                println!("{}\t{}", task.id, task.text);
            }
        }
        Some(Commands::Edit { id, text }) => {
            let gateway = open(&config).await?;
            if !gateway.update(id, &text).await? {
                eprintln!("Task #{} not found", id);
                std::process::exit(1);
            }
        }
        Some(Commands::Delete { id }) => {
            let gateway = open(&config).await?;
            if !gateway.delete(id).await? {
                eprintln!("Task #{} not found", id);
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tasklist", &mut std::io::stdout());
        }
        Some(Commands::Tui) | None => {
            // The screen creates the table itself while showing its placeholder.
            run_tui(Gateway::open(&config.db_path)?).await?;
        }
    }

    Ok(())
}

async fn open(config: &Config) -> Result<Gateway> {
    let gateway = Gateway::open(&config.db_path)?;
    gateway.ensure_schema().await?;
    Ok(gateway)
}

use clap::{Parser, Subcommand};
use url::Url;

#[derive(Parser)]
#[command(name = "files-cli")]
#[command(about = "Client for the pattern-router file server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file's contents
    Read { name: String },
    /// Create a new file with one line of text
    Add { name: String, text: String },
    /// Append a line of text to a file
    Update {
        name: String,
        text: String,
        /// Send PUT instead of PATCH
        #[arg(long)]
        put: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Read { name } => {
            let url = Url::parse(&format!("{base}/read/{name}"))?;
            client.get(url).send().await?
        }
        Commands::Add { name, text } => {
            let url = Url::parse_with_params(&format!("{base}/add/{name}"), &[("text", text)])?;
            client.post(url).send().await?
        }
        Commands::Update { name, text, put } => {
            let url = Url::parse_with_params(&format!("{base}/update/{name}"), &[("text", text)])?;
            if put {
                client.put(url).send().await?
            } else {
                client.patch(url).send().await?
            }
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if status.is_success() {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
    } else {
        eprintln!("Error: server returned status {status}");
        eprintln!("Response: {text}");
        std::process::exit(1);
    }
    Ok(())
}

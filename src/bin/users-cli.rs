use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use user_proxy::User;

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Command-line client for a running user-proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    List,
    /// Create a user
    Create(UserArgs),
    /// Update the user with the given id
    Update {
        #[arg(value_name = "ID")]
        user_id: String,
        #[command(flatten)]
        user: UserArgs,
    },
}

#[derive(Args)]
struct UserArgs {
    #[arg(long, default_value_t = 0)]
    id: i64,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    username: String,
    #[arg(long, default_value = "")]
    email: String,
}

impl From<UserArgs> for User {
    fn from(args: UserArgs) -> Self {
        User {
            id: args.id,
            name: args.name,
            username: args.username,
            email: args.email,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let users_url = format!("{}/api/users", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::List => client.get(&users_url).send().await?,
        Commands::Create(args) => {
            client
                .post(&users_url)
                .json(&User::from(args))
                .send()
                .await?
        }
        Commands::Update { user_id, user } => {
            client
                .put(format!("{users_url}/{user_id}"))
                .json(&User::from(user))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: user-proxy returned status {}", status);
        eprintln!("Response: {}", text.trim_end());
        return Ok(());
    }

    eprintln!("Status: {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

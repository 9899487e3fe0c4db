use clap::{Args, Parser, Subcommand};
use solsol_client::api::mascot::{CreateMascot, UpdateMascot};
use solsol_client::config::{CSRF_SEED_PATH, DEFAULT_BASE_URL};
use solsol_client::{ApiClient, ApiError, ClientConfig, Method, friendly_message};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(String),
    #[error("not authenticated; run `solsol login` first")]
    NotAuthenticated,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::Api(friendly_message(&error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "solsol", about = "Solsol mascot backend CLI")]
struct Cli {
    #[arg(long, env = "SOLSOL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is reachable.
    Ping,
    /// Register a new account.
    Signup {
        user_id: String,
        password: String,
        nickname: String,
    },
    /// Authenticate and print the resulting profile.
    Login { user_id: String, password: String },
    /// Print the authenticated user's profile.
    Me,
    /// End the session.
    Logout,
    Mascot(MascotCommand),
    Challenge(ChallengeCommand),
    /// Look up another user's profile, points included.
    User { user_id: i64 },
}

#[derive(Args, Debug)]
struct MascotCommand {
    #[command(subcommand)]
    command: MascotSubcommand,
}

#[derive(Subcommand, Debug)]
enum MascotSubcommand {
    Get,
    Create {
        name: String,
        #[arg(long = "type", default_value = "chick")]
        mascot_type: String,
        #[arg(long)]
        item: Option<String>,
    },
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        item: Option<String>,
    },
    Equip {
        #[arg(required = true)]
        item_ids: Vec<i64>,
    },
}

#[derive(Args, Debug)]
struct ChallengeCommand {
    #[command(subcommand)]
    command: ChallengeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChallengeSubcommand {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Show {
        challenge_id: i64,
    },
    Join {
        challenge_id: i64,
    },
    Progress {
        challenge_id: i64,
        #[arg(long, default_value_t = 1)]
        amount: i32,
    },
    Mine {
        #[arg(long)]
        status: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = ApiClient::new(ClientConfig::with_base_url(cli.base_url))?;

    match cli.command {
        Command::Ping => run_ping(&client).await,
        Command::Signup {
            user_id,
            password,
            nickname,
        } => {
            client.signup(&user_id, &password, &nickname).await?;
            println!("account created");
            Ok(())
        }
        Command::Login { user_id, password } => run_login(&client, &user_id, &password).await,
        Command::Me => run_me(&client).await,
        Command::Logout => {
            client.logout().await;
            println!("logged out");
            Ok(())
        }
        Command::Mascot(mascot) => run_mascot(&client, mascot).await,
        Command::Challenge(challenge) => run_challenge(&client, challenge).await,
        Command::User { user_id } => {
            let user = client.user_info(user_id).await?;
            print_json(&serde_json::to_value(user)?)
        }
    }
}

async fn run_ping(client: &ApiClient) -> Result<(), CliError> {
    client.request(Method::GET, CSRF_SEED_PATH, None).await?;
    println!("ok");
    Ok(())
}

async fn run_login(client: &ApiClient, user_id: &str, password: &str) -> Result<(), CliError> {
    client.login(user_id, password).await?;
    match client.fetch_user().await {
        Some(user) => print_json(&serde_json::to_value(user)?),
        None => {
            println!("logged in");
            Ok(())
        }
    }
}

async fn run_me(client: &ApiClient) -> Result<(), CliError> {
    let user = client.fetch_user().await.ok_or(CliError::NotAuthenticated)?;
    print_json(&serde_json::to_value(user)?)
}

async fn run_mascot(client: &ApiClient, mascot: MascotCommand) -> Result<(), CliError> {
    match mascot.command {
        MascotSubcommand::Get => match client.mascot().await? {
            Some(mascot) => print_json(&serde_json::to_value(mascot)?),
            None => {
                println!("no mascot yet");
                Ok(())
            }
        },
        MascotSubcommand::Create {
            name,
            mascot_type,
            item,
        } => {
            let created = client
                .create_mascot(&CreateMascot {
                    name,
                    mascot_type,
                    equipped_item: item,
                })
                .await?;
            print_json(&serde_json::to_value(created)?)
        }
        MascotSubcommand::Update { name, item } => {
            let updated = client
                .update_mascot(&UpdateMascot {
                    name,
                    equipped_item: item,
                })
                .await?;
            print_json(&serde_json::to_value(updated)?)
        }
        MascotSubcommand::Equip { item_ids } => {
            let equipped = client.equip_items(&item_ids).await?;
            print_json(&serde_json::to_value(equipped)?)
        }
    }
}

async fn run_challenge(client: &ApiClient, challenge: ChallengeCommand) -> Result<(), CliError> {
    match challenge.command {
        ChallengeSubcommand::List { category } => {
            let challenges = client.challenges(category.as_deref()).await?;
            print_json(&serde_json::to_value(challenges)?)
        }
        ChallengeSubcommand::Show { challenge_id } => {
            let challenge = client.challenge_detail(challenge_id).await?;
            print_json(&serde_json::to_value(challenge)?)
        }
        ChallengeSubcommand::Join { challenge_id } => {
            let receipt = client.join_challenge(challenge_id).await?;
            print_json(&receipt)
        }
        ChallengeSubcommand::Progress {
            challenge_id,
            amount,
        } => {
            let progress = client.update_challenge_progress(challenge_id, amount).await?;
            print_json(&progress)
        }
        ChallengeSubcommand::Mine { status } => {
            let challenges = client.my_challenges(status.as_deref()).await?;
            print_json(&serde_json::to_value(challenges)?)
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

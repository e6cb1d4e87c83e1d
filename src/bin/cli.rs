use bookit::cli::{assign_role, create_admin, describe_error, prune_tokens};
use bookit_config::DatabaseConfig;
use bookit_db::init_db_pool;
use bookit_models::{RegisterRequest, RoleName};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bookit-cli")]
#[command(about = "Bookit CLI - Administrative tools for Bookit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Unique username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Phone number (optional)
        #[arg(long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Grant a role to an existing user
    AssignRole {
        /// Email of the user
        #[arg(short = 'e', long)]
        email: String,

        /// Role to grant: admin or user
        #[arg(short = 'r', long)]
        role: RoleName,
    },
    /// Delete revocation records of tokens that have already expired
    PruneTokens,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool(&DatabaseConfig::from_env()).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        eprintln!("❌ Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Commands::CreateAdmin {
            name,
            username,
            email,
            phone,
            password,
        } => handle_create_admin(&pool, name, username, email, phone, password).await,
        Commands::AssignRole { email, role } => handle_assign_role(&pool, &email, role).await,
        Commands::PruneTokens => handle_prune_tokens(&pool).await,
    }
}

fn prompt(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(
    pool: &sqlx::PgPool,
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    password: Option<String>,
) {
    // Use provided values or prompt interactively
    let name = name.unwrap_or_else(|| prompt("Name"));
    let username = username.unwrap_or_else(|| prompt("Username"));
    let email = email.unwrap_or_else(|| prompt("Email address"));

    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    let dto = RegisterRequest {
        name: Some(name.into()),
        username: Some(username.into()),
        email: Some(email.into()),
        phone: phone.map(Into::into),
        password: Some(password.into()),
    };

    match create_admin(pool, dto).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Username: {}", user.username);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin:\n{}", describe_error(&e));
            std::process::exit(1);
        }
    }
}

async fn handle_assign_role(pool: &sqlx::PgPool, email: &str, role: RoleName) {
    match assign_role(pool, email, role).await {
        Ok(user) => println!("✅ Role '{}' granted to {}", role, user.email),
        Err(e) => {
            eprintln!("❌ Error assigning role: {}", describe_error(&e));
            std::process::exit(1);
        }
    }
}

async fn handle_prune_tokens(pool: &sqlx::PgPool) {
    match prune_tokens(pool).await {
        Ok(count) => println!("✅ Removed {} expired revocation record(s)", count),
        Err(e) => {
            eprintln!("❌ Error pruning tokens: {}", describe_error(&e));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

const DEFAULT_MESSAGE_LIMIT: u32 = 100;
const DEFAULT_EVENT_LIMIT: u32 = 1000;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing bearer token; pass --token, set ADMIN_TOKEN, or run `login` first")]
    MissingToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected {action}: {message}")]
    Api { action: String, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid date {0:?}; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("you cannot delete your own account")]
    SelfDelete,
    #[error("refusing to delete user {0} without --yes")]
    NotConfirmed(i64),
}

#[derive(Parser, Debug)]
#[command(name = "admin-cli", about = "Admin console API CLI")]
struct Cli {
    #[arg(long, env = "ADMIN_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "ADMIN_TOKEN")]
    token: Option<String>,

    /// Log each request to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Sign in and print the bearer token.
    Login(Credentials),
    /// Sign in, then grant the signed-in account the admin role.
    MakeAdmin(Credentials),
    Users(UsersCommand),
    /// Read-only inspection of another user's data.
    Inspect(InspectCommand),
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List {
        /// Only users with an active WhatsApp link.
        #[arg(long, default_value_t = false)]
        connected: bool,
    },
    SetAdmin {
        user_id: i64,
        #[arg(action = clap::ArgAction::Set)]
        is_admin: bool,
    },
    Delete {
        user_id: i64,
        /// Confirm the irreversible deletion.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct InspectCommand {
    #[command(subcommand)]
    command: InspectSubcommand,
}

#[derive(Subcommand, Debug)]
enum InspectSubcommand {
    Groups {
        user_id: i64,
    },
    Messages {
        user_id: i64,
        #[arg(long)]
        group: Option<i64>,
        #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    Events {
        user_id: i64,
        /// Restrict to one day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = DEFAULT_EVENT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    Stats {
        user_id: i64,
        #[arg(long)]
        group: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "admin_cli=debug" } else { "admin_cli=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let ctx = CliContext { base_url: cli.base_url, token: cli.token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Login(creds) => {
            let (token, user) = login(&ctx, &creds).await?;
            eprintln!("Signed in as {}", display_name(&user));
            println!("{token}");
            Ok(())
        }
        Command::MakeAdmin(creds) => run_make_admin(&ctx, &creds).await,
        Command::Users(users) => run_users(&ctx, users).await,
        Command::Inspect(inspect) => run_inspect(&ctx, inspect).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", cli.base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Api {
            action: format!("HTTP {}", status.as_u16()),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn login(cli: &CliContext, creds: &Credentials) -> Result<(String, Value), CliError> {
    let payload = serde_json::json!({ "email": creds.email, "password": creds.password });
    let mut body = send(cli, None, reqwest::Method::POST, "/api/auth/login", Some(payload)).await?;
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(CliError::MissingField("token"))?;
    let user = body.get_mut("user").map(Value::take).unwrap_or(Value::Null);
    Ok((token, user))
}

async fn run_make_admin(cli: &CliContext, creds: &Credentials) -> Result<(), CliError> {
    let (token, user) = login(cli, creds).await?;
    eprintln!("Signed in as {}", display_name(&user));

    let body = send(cli, Some(&token), reqwest::Method::POST, "/api/admin/make-me-admin", None).await?;
    let message = body.get("message").and_then(Value::as_str).unwrap_or("You are now an admin.");
    println!("{message}");
    println!("{}", next_steps(&cli.base_url));
    Ok(())
}

async fn run_users(cli: &CliContext, users: UsersCommand) -> Result<(), CliError> {
    match users.command {
        UsersSubcommand::List { connected } => {
            let mut body = api_request(cli, reqwest::Method::GET, "/api/admin/users", None).await?;
            let list = body.get_mut("users").map(Value::take).ok_or(CliError::MissingField("users"))?;
            let list = if connected { connected_only(list) } else { list };
            print_json(&list)
        }
        UsersSubcommand::SetAdmin { user_id, is_admin } => {
            let path = format!("/api/admin/users/{user_id}/admin");
            let json =
                api_request(cli, reqwest::Method::PUT, &path, Some(serde_json::json!({ "is_admin": is_admin }))).await?;
            print_json(&json)
        }
        UsersSubcommand::Delete { user_id, yes } => {
            let me = api_request(cli, reqwest::Method::GET, "/api/auth/me", None).await?;
            check_delete_allowed(user_id, actor_id(&me), yes)?;
            let path = format!("/api/admin/users/{user_id}");
            let json = api_request(cli, reqwest::Method::DELETE, &path, None).await?;
            print_json(&json)
        }
    }
}

async fn run_inspect(cli: &CliContext, inspect: InspectCommand) -> Result<(), CliError> {
    let path = match inspect.command {
        InspectSubcommand::Groups { user_id } => format!("/api/admin/users/{user_id}/groups"),
        InspectSubcommand::Messages { user_id, group, limit, offset } => messages_path(user_id, group, limit, offset),
        InspectSubcommand::Events { user_id, date, limit, offset } => {
            let date = date.as_deref().map(validate_date).transpose()?;
            events_path(user_id, date, limit, offset)
        }
        InspectSubcommand::Stats { user_id, group } => match group {
            Some(group_id) => format!("/api/admin/users/{user_id}/stats?group_id={group_id}"),
            None => format!("/api/admin/users/{user_id}/stats"),
        },
    };
    let json = api_request(cli, reqwest::Method::GET, &path, None).await?;
    print_json(&json)
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let token = cli.token.as_deref().ok_or(CliError::MissingToken)?;
    send(cli, Some(token), method, path, body).await
}

async fn send(
    cli: &CliContext,
    token: Option<&str>,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}{}", cli.base_url.trim_end_matches('/'), path);
    tracing::debug!(%method, %url, "request");

    let request = client.request(method.clone(), &url);
    let request = match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    };
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);
    tracing::debug!(%method, %url, status = status.as_u16(), "response");

    check_envelope(&format!("{method} {path}"), status.as_u16(), value)
}

/// Accept a `{ success, error, ... }` body; `success` defaults to the HTTP status.
fn check_envelope(action: &str, status: u16, value: Value) -> Result<Value, CliError> {
    let status_ok = (200..300).contains(&status);
    let success = value.get("success").and_then(Value::as_bool).unwrap_or(status_ok);
    if success && status_ok {
        return Ok(value);
    }
    let message = value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| format!("HTTP {status}"), ToOwned::to_owned);
    Err(CliError::Api { action: action.to_owned(), message })
}

fn check_delete_allowed(user_id: i64, actor_id: Option<i64>, confirmed: bool) -> Result<(), CliError> {
    if actor_id == Some(user_id) {
        return Err(CliError::SelfDelete);
    }
    if !confirmed {
        return Err(CliError::NotConfirmed(user_id));
    }
    Ok(())
}

fn actor_id(me: &Value) -> Option<i64> {
    let user = me.get("user").unwrap_or(me);
    user.get("id").and_then(|id| id.as_i64().or_else(|| id.as_str()?.parse().ok()))
}

fn connected_only(users: Value) -> Value {
    match users {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|u| {
                    u.get("whatsapp_connected")
                        .or_else(|| u.get("whatsappConnected"))
                        .and_then(Value::as_bool)
                        .unwrap_or(false)
                })
                .collect(),
        ),
        other => other,
    }
}

fn messages_path(user_id: i64, group: Option<i64>, limit: u32, offset: u32) -> String {
    let mut path = format!("/api/admin/users/{user_id}/messages?limit={limit}&offset={offset}");
    if let Some(group_id) = group {
        path.push_str(&format!("&group_id={group_id}"));
    }
    path
}

fn events_path(user_id: i64, date: Option<NaiveDate>, limit: u32, offset: u32) -> String {
    let mut path = format!("/api/admin/users/{user_id}/events?limit={limit}&offset={offset}");
    if let Some(date) = date {
        path.push_str(&format!("&date={}", date.format("%Y-%m-%d")));
    }
    path
}

/// Parse a zero-padded `YYYY-MM-DD` calendar date.
fn validate_date(raw: &str) -> Result<NaiveDate, CliError> {
    let invalid = || CliError::InvalidDate(raw.to_owned());
    if raw.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

fn display_name(user: &Value) -> String {
    user.get("username")
        .and_then(Value::as_str)
        .or_else(|| user.get("email").and_then(Value::as_str))
        .unwrap_or("user")
        .to_owned()
}

/// Instructions printed after a successful elevation: the new role only
/// applies to a fresh session.
fn next_steps(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!(
        "Next steps:\n  1. Log out of the web app\n  2. Log in again at {base}/login\n  3. Open the user directory at {base}/"
    )
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

// travelcli/src/main.rs
//! Command-line client for the TravelM8 API
//!
//! Signs a user up or in against the identity-provider endpoints, shows the
//! account's attributes, and exercises the authenticated greeting endpoint.

use dotenv::dotenv;
use std::env;
use std::time::Duration;

mod client;
mod session;

use client::{ApiClient, SignupRequest};
use session::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Presentation state for the greeting call. The loading state doubles as a
/// guard against firing a second call while one is in flight.
#[derive(Debug)]
enum CallState {
    Idle,
    Loading,
    Success(String),
    Error(String),
}

fn render_call_state(state: &CallState) {
    match state {
        CallState::Idle => {}
        CallState::Loading => println!("Calling /hello ..."),
        CallState::Success(message) => {
            println!();
            println!("API Success:");
            println!("  {}", message);
        }
        CallState::Error(reason) => {
            println!();
            println!("API Error:");
            println!("  {}", reason);
        }
    }
}

/// Perform the greeting call once, driving the presentation state machine:
/// idle -> loading -> success | error. A call already in flight is not
/// repeated.
async fn call_hello_once(state: &mut CallState, client: &ApiClient, session: &mut Session) {
    if matches!(state, CallState::Loading) {
        return;
    }

    *state = CallState::Loading;
    render_call_state(state);

    // Obtain the current (refreshed-if-needed) token right before the call
    let outcome = match session.current_token(client).await {
        Ok(token) => {
            println!("Using session token: {}", truncated_token(token));
            client.call_hello(token).await
        }
        Err(e) => Err(e),
    };

    *state = match outcome {
        Ok(message) => CallState::Success(message),
        Err(e) => CallState::Error(e.to_string()),
    };
    render_call_state(state);
}

/// First characters of the token, for display only
fn truncated_token(token: &str) -> String {
    let prefix: String = token.chars().take(30).collect();
    format!("{}...", prefix)
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn require_flag(args: &[String], name: &str) -> anyhow::Result<String> {
    flag_value(args, name).ok_or_else(|| anyhow::anyhow!("missing required flag {}", name))
}

fn print_usage() {
    println!("Usage:");
    println!("  travelcli signup --email <email> --given-name <name> --family-name <name> --password <password>");
    println!("  travelcli hello  --email <email> --password <password>");
    println!();
    println!("The API base URL comes from --api-url or TRAVELM8_API_URL");
    println!("(default http://localhost:8080).");
}

fn print_attributes(attributes: &client::UserAttributes) {
    println!("Hello, {}!", attributes.display_name());
    if let Some(sub) = attributes.sub.as_deref() {
        println!("User id: {}", sub);
    }
    if let (Some(given), Some(family)) = (
        attributes.given_name.as_deref(),
        attributes.family_name.as_deref(),
    ) {
        println!("Name: {} {}", given, family);
    }
    if let Some(email) = attributes.email.as_deref() {
        println!("Your email: {}", email);
    }
    if let Some(verified) = attributes.email_verified.as_deref() {
        println!("Email verified: {}", if verified == "true" { "Yes" } else { "No" });
    }
}

async fn run_signup(client: &ApiClient, args: &[String]) -> anyhow::Result<()> {
    let email = require_flag(args, "--email")?;
    let given_name = require_flag(args, "--given-name")?;
    let family_name = require_flag(args, "--family-name")?;
    let password = require_flag(args, "--password")?;

    let auth = client
        .signup(&SignupRequest {
            email: &email,
            given_name: &given_name,
            family_name: &family_name,
            password: &password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("sign-up failed: {}", e))?;

    println!("Account created.");
    print_attributes(&auth.user);

    Ok(())
}

async fn run_hello(client: &ApiClient, args: &[String]) -> anyhow::Result<()> {
    let email = require_flag(args, "--email")?;
    let password = require_flag(args, "--password")?;

    let auth = client
        .login(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("sign-in failed: {}", e))?;

    // Fetch attributes for display; a failure here degrades the welcome
    // line, it does not abort the flow
    match client.fetch_attributes(&auth.token).await {
        Ok(attributes) => print_attributes(&attributes),
        Err(e) => println!("Loading user details failed: {}", e),
    }

    let mut session = Session::new(auth.token, auth.expires_at);

    let mut state = CallState::Idle;
    call_hello_once(&mut state, client, &mut session).await;

    if let CallState::Error(_) = state {
        std::process::exit(1);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match args.first() {
        Some(c) => c.as_str(),
        None => {
            print_usage();
            return Ok(());
        }
    };

    let base_url = flag_value(&args, "--api-url")
        .or_else(|| env::var("TRAVELM8_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let client = ApiClient::new(base_url, REQUEST_TIMEOUT)?;

    match command {
        "signup" => run_signup(&client, &args).await,
        "hello" => run_hello(&client, &args).await,
        _ => {
            print_usage();
            anyhow::bail!("unknown command: {}", command);
        }
    }
}

//! Demo: log in, walk into a folder and back again.
//!
//! Usage:
//!   cargo run --example browse -- --email EMAIL --password PASSWORD [--url URL] [--config FILE]

use std::env;
use std::path::PathBuf;

use cloudlib::{ClientConfig, CloudSession, Listing, Node};
use tracing_subscriber::EnvFilter;

fn print_listing(title: &str, listing: &Listing) {
    println!("\n📁 {}\n", title);
    if listing.is_empty() {
        println!("   (empty)");
    }
    for node in listing.sorted_nodes() {
        match node {
            Node::Folder(folder) => println!("   📂 {}/", folder.name()),
            Node::File(file) => println!("   📄 {} ({} bytes)", file.name(), file.size()),
        }
    }
}

#[tokio::main]
async fn main() -> cloudlib::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cloudlib=debug")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut email = None;
    let mut password = None;
    let mut url = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--email" | "-e" => {
                email = args.get(i + 1).cloned();
                i += 2;
            }
            "--password" | "-p" => {
                password = args.get(i + 1).cloned();
                i += 2;
            }
            "--url" => {
                url = args.get(i + 1).cloned();
                i += 2;
            }
            "--config" => {
                config_path = args.get(i + 1).map(PathBuf::from);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let email = email.expect("--email is required");
    let password = password.expect("--password is required");

    let mut config = ClientConfig::load(config_path.as_deref())?;
    if let Some(url) = url {
        config.base_url = url;
    }

    println!("Logging in to {}...", config.base_url);
    let session = CloudSession::connect(&config)?;
    let user = session.login(&email, &password).await?;
    println!(
        "Hello {}! Upload limit {} MB, storage {} MB.",
        user.username, user.max_upload_mb, user.max_storage_mb
    );

    let history = &session.state().history;
    let home = history.current_path().unwrap_or_default();
    let listing = session.open(&home).await?;
    print_listing(&home.to_string(), &listing);

    let size = session.folder_size(user.personal_folder_id, None).await?;
    println!("\n📊 Used: {:.2} MB", size as f64 / 1_000_000.0);

    let Some(first) = listing.sorted_nodes().into_iter().find_map(|n| match n {
        Node::Folder(folder) => Some(folder),
        Node::File(_) => None,
    }) else {
        println!("\nNo sub folders to walk into.");
        session.logout().await?;
        return Ok(());
    };

    let inner = session.enter(&first).await?;
    let path = history.current_path().unwrap_or_default();
    print_listing(&path.to_string(), &inner);

    history.go_back();
    if let Some(listing) = session.reload().await? {
        print_listing("(back)", &listing);
    }
    println!("Can go forward: {}", history.can_go_forward());

    history.go_forward();
    if let Some(listing) = session.reload().await? {
        print_listing("(forward)", &listing);
    }

    session.logout().await?;
    println!("\n✅ Logged out");
    Ok(())
}

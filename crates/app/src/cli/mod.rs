use std::sync::Arc;

use catalogue::{
    context::CatalogueContext,
    fixtures::Fixture,
    session::{FileKeyValueStore, SessionService},
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::{config::GlobalArgs, logging};

mod products;
mod session;

#[derive(Debug, Parser)]
#[command(
    name = "catalogue-app",
    about = "Catalogue CLI",
    long_about = None,
    version
)]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in with an email and password
    SignIn(session::SignInArgs),
    /// Create an account and sign in
    SignUp(session::SignUpArgs),
    /// Forget the persisted session
    SignOut,
    /// Show the signed in profile
    Whoami,
    /// Change the signed in user's name or email
    UpdateProfile(session::UpdateProfileArgs),
    /// Browse and manage products
    Products(products::ProductsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init(&self.global)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = build_context(&self.global).await?;

        match self.command {
            Commands::SignIn(args) => session::sign_in(&context, args).await,
            Commands::SignUp(args) => session::sign_up(&context, args).await,
            Commands::SignOut => session::sign_out(&context).await,
            Commands::Whoami => session::whoami(&context).await,
            Commands::UpdateProfile(args) => session::update_profile(&context, args).await,
            Commands::Products(command) => products::run(&context, command).await,
        }
    }
}

/// Seed the in-memory collections and restore the persisted session.
async fn build_context(global: &GlobalArgs) -> Result<CatalogueContext, String> {
    let storage = Arc::new(FileKeyValueStore::new(&global.storage_path));
    let parts = CatalogueContext::in_memory(storage, global.session_config());

    if global.fixtures.is_file() {
        Fixture::from_path(&global.fixtures)
            .map_err(|error| format!("failed to read fixtures: {error}"))?
            .load_into(&parts.users, &parts.products)
            .await
            .map_err(|error| format!("failed to load fixtures: {error}"))?;

        info!(
            path = %global.fixtures.display(),
            users = parts.users.len().await,
            "loaded fixtures"
        );
    } else {
        warn!(
            path = %global.fixtures.display(),
            "fixtures file not found, starting with an empty catalogue"
        );
    }

    parts.context.session.restore().await;

    Ok(parts.context)
}

use catalogue::{
    context::CatalogueContext,
    users::{NewUser, UserUuid},
};
use clap::Args;

use crate::output;

#[derive(Debug, Args)]
pub(crate) struct SignInArgs {
    /// Account email, matched exactly
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "CATALOGUE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct SignUpArgs {
    /// Display name, also used as the seller name on new products
    #[arg(long)]
    name: String,

    /// Account email; must not be registered yet
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "CATALOGUE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateProfileArgs {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New email
    #[arg(long)]
    email: Option<String>,

    /// Profile id to write; defaults to the signed in user's id
    #[arg(long)]
    id: Option<UserUuid>,
}

pub(crate) async fn sign_in(context: &CatalogueContext, args: SignInArgs) -> Result<(), String> {
    let session = context
        .session
        .sign_in(&args.email, &args.password)
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    output::print_session(&session);

    Ok(())
}

pub(crate) async fn sign_up(context: &CatalogueContext, args: SignUpArgs) -> Result<(), String> {
    let session = context
        .session
        .sign_up(NewUser::new(args.name, args.email, args.password))
        .await
        .map_err(|error| format!("failed to sign up: {error}"))?;

    output::print_session(&session);

    Ok(())
}

pub(crate) async fn sign_out(context: &CatalogueContext) -> Result<(), String> {
    context
        .session
        .sign_out()
        .await
        .map_err(|error| format!("failed to sign out: {error}"))?;

    println!("signed out");

    Ok(())
}

pub(crate) async fn whoami(context: &CatalogueContext) -> Result<(), String> {
    let session = context.session.session().await;

    if !session.is_authenticated() {
        println!("not signed in");
        return Ok(());
    }

    output::print_session(&session);

    let listed = context
        .profile_stats()
        .await
        .map_err(|error| format!("failed to count products: {error}"))?;

    println!("products: {listed}");

    Ok(())
}

pub(crate) async fn update_profile(
    context: &CatalogueContext,
    args: UpdateProfileArgs,
) -> Result<(), String> {
    let mut profile = context
        .session
        .session()
        .await
        .user_data
        .ok_or_else(|| "failed to update profile: no user is signed in".to_string())?;

    if let Some(name) = args.name {
        profile.name = name;
    }

    if let Some(email) = args.email {
        profile.email = email;
    }

    if let Some(id) = args.id {
        profile.id = id;
    }

    let session = context
        .session
        .update_profile(profile)
        .await
        .map_err(|error| format!("failed to update profile: {error}"))?;

    output::print_session(&session);

    Ok(())
}

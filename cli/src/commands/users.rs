//! `users` subcommands.

use anyhow::{bail, Context, Result};
use rand::Rng;
use trendboard_shared::users::{activation_message, generate_password, NewUser, UserId, UserPatch};

use super::confirm;
use crate::{
    cli::{OutputFormat, UserCommands},
    client::ApiClient,
    display::{print_json, users_table},
};

/// Runs a `users` subcommand.
pub async fn run(client: &ApiClient, command: UserCommands, format: OutputFormat) -> Result<()> {
    match command {
        UserCommands::List => {
            let users = client.users().await.context("Failed to fetch users")?;
            match format {
                OutputFormat::Json => print_json(&users),
                OutputFormat::Table => {
                    println!("{}", users_table(&users));
                    Ok(())
                },
            }
        },
        UserCommands::Create {
            email,
            first_name,
            last_name,
            user_type,
            gender,
            date_of_birth,
            password,
            generate_password: generate,
        } => {
            let generated = generate.then(random_password);
            let form = NewUser {
                email,
                password: generated.clone().or(password).unwrap_or_default(),
                first_name,
                last_name,
                user_type,
                gender,
                date_of_birth,
            }
            .normalized();
            form.validate()?;

            let response = match client.create_user(&form).await {
                Ok(response) => response,
                Err(err) => bail!("Failed to create user: {}", err.user_message()),
            };
            match format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => println!(
                    "{}",
                    response.message.as_deref().unwrap_or("User created successfully!")
                ),
            }
            if let Some(password) = generated {
                eprintln!("Generated password: {password}");
            }
            Ok(())
        },
        UserCommands::Activate {
            id,
        } => set_active(client, &id, true, format).await,
        UserCommands::Deactivate {
            id,
        } => set_active(client, &id, false, format).await,
        UserCommands::Delete {
            id,
            yes,
        } => {
            if !confirm("Are you sure you want to delete this user?", yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let response = match client.delete_user(&id).await {
                Ok(response) => response,
                Err(err) => bail!("Failed to delete user: {}", err.user_message()),
            };
            match format {
                OutputFormat::Json => print_json(&response),
                OutputFormat::Table => {
                    println!("User deleted successfully!");
                    Ok(())
                },
            }
        },
    }
}

async fn set_active(client: &ApiClient, id: &UserId, is_active: bool, format: OutputFormat) -> Result<()> {
    let response = match client.update_user(id, &UserPatch::active(is_active)).await {
        Ok(response) => response,
        Err(err) => bail!("Failed to update user status: {}", err.user_message()),
    };
    match format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Table => {
            println!("{}", activation_message(is_active));
            Ok(())
        },
    }
}

fn random_password() -> String {
    let mut rng = rand::thread_rng();
    generate_password(|len| rng.gen_range(0..len))
}

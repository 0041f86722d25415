use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use lang_console::http::frameworks::PresetForm;
use lang_console::models::framework::FrameworkPreset;
use lang_console::ui::badge::{framework_badge, lock_badge};

use super::{confirm_delete, print_json};
use crate::FrameworkCommands;

pub async fn cmd_frameworks(
    state: &AppState,
    command: &FrameworkCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = &state.http_client;
    match command {
        FrameworkCommands::List { r#type } => {
            let presets = client.list_presets(*r#type).await?;
            if json {
                return print_json(&presets);
            }
            if presets.is_empty() {
                println!("No framework presets");
            }
            for preset in &presets {
                print_preset(preset);
            }
            return Ok(());
        }
        FrameworkCommands::Show { id } => {
            let preset = client.get_preset(id).await?;
            if json {
                return print_json(&preset);
            }
            print_preset(&preset);
            for url in &preset.images.urls {
                println!("    {}", url);
            }
            return Ok(());
        }
        _ => {}
    }

    let admin = state.session.require_admin().await?;
    tracing::debug!("Preset administration as {}", admin.display_name());

    match command {
        FrameworkCommands::Create {
            name,
            r#type,
            images,
        } => {
            let form = PresetForm {
                name: name.clone(),
                framework_type: *r#type,
                images: images.clone(),
            };
            let created = client.create_preset(form).await?;
            if json {
                return print_json(&created);
            }
            match created {
                Some(preset) => println!("{} preset {} ({})", "Created".green(), preset.name.bold(), preset.id),
                None => println!("{} preset {}", "Created".green(), name.bold()),
            }
        }
        FrameworkCommands::Update {
            id,
            name,
            r#type,
            images,
        } => {
            let form = PresetForm {
                name: name.clone(),
                framework_type: *r#type,
                images: images.clone(),
            };
            let updated = client.update_preset(id, form).await?;
            if json {
                return print_json(&updated);
            }
            println!("{} preset {}", "Updated".green(), id);
        }
        FrameworkCommands::Delete { id, confirm } => {
            confirm_delete(confirm.as_deref(), &format!("framework preset {}", id))?;
            client.delete_preset(id).await?;
            if json {
                return print_json(&json!({ "deleted": id }));
            }
            println!("{} preset {}", "Deleted".red(), id);
        }
        FrameworkCommands::ToggleLock { id } => {
            let lock = client.toggle_preset_lock(id).await?;
            if json {
                return print_json(&lock);
            }
            println!("Preset {} is now {}", id, lock_badge(lock.locked));
        }
        FrameworkCommands::List { .. } | FrameworkCommands::Show { .. } => {}
    }
    Ok(())
}

fn print_preset(preset: &FrameworkPreset) {
    println!(
        "{}  {}  {} {}",
        preset.name.bold(),
        preset.id.dimmed(),
        framework_badge(preset.framework_type),
        lock_badge(preset.locked)
    );
}

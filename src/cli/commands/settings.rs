use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::CommandEntry;
use crate::config::Theme;

const CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "CAD", "AUD"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        "Show or change account settings and preferences",
        "settings [show] | settings set <name|email|currency|theme|notify> <value...>",
        cmd_settings,
    )]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => handle_show(context),
        Some((sub, rest)) => match sub.to_ascii_lowercase().as_str() {
            "show" => handle_show(context),
            "set" => handle_set(context, rest),
            other => Err(CommandError::InvalidArguments(format!(
                "unknown settings subcommand `{}`. Available: show, set",
                other
            ))),
        },
    }
}

fn handle_show(context: &mut ShellContext) -> CommandResult {
    let config = context.config();
    section("Settings");
    io::print_info(format!("  Name     : {}", config.profile.name));
    io::print_info(format!("  Email    : {}", config.profile.email));
    io::print_info(format!("  Currency : {}", config.currency));
    io::print_info(format!("  Theme    : {}", config.theme.label()));
    io::print_info(format!(
        "  Notifications: email {}, push {}, sms {}",
        toggle(config.notifications.email),
        toggle(config.notifications.push),
        toggle(config.notifications.sms)
    ));
    Ok(())
}

fn handle_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: settings set <name|email|currency|theme|notify> <value...>".into(),
        ));
    };
    match field.to_ascii_lowercase().as_str() {
        "name" => {
            let value = joined_value(rest, "settings set name <value>")?;
            context.config_mut().profile.name = value;
        }
        "email" => {
            let value = joined_value(rest, "settings set email <value>")?;
            context.config_mut().profile.email = value;
        }
        "currency" => {
            let value = joined_value(rest, "settings set currency <code>")?.to_uppercase();
            if !CURRENCIES.contains(&value.as_str()) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown currency `{}`. Available: {}",
                    value,
                    CURRENCIES.join(", ")
                )));
            }
            context.config_mut().currency = value;
        }
        "theme" => {
            let value = joined_value(rest, "settings set theme <light|dark|system>")?;
            let theme = Theme::parse(&value).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown theme `{}`", value))
            })?;
            context.config_mut().theme = theme;
        }
        "notify" => {
            let (channel, state) = match rest {
                [channel, state] => (*channel, *state),
                _ => {
                    return Err(CommandError::InvalidArguments(
                        "usage: settings set notify <email|push|sms> <on|off>".into(),
                    ))
                }
            };
            let enabled = match state.to_ascii_lowercase().as_str() {
                "on" | "true" => true,
                "off" | "false" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "expected on/off, got `{}`",
                        other
                    )))
                }
            };
            let notifications = &mut context.config_mut().notifications;
            match channel.to_ascii_lowercase().as_str() {
                "email" => notifications.email = enabled,
                "push" => notifications.push = enabled,
                "sms" => notifications.sms = enabled,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown notification channel `{}`",
                        other
                    )))
                }
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown settings field `{}`",
                other
            )))
        }
    }
    context.persist_config()?;
    io::print_success("Your settings have been saved successfully.");
    Ok(())
}

fn joined_value(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {}", usage)));
    }
    Ok(args.join(" "))
}

fn toggle(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

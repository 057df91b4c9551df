//! Command-line front end of the HRM portal.
//!
//! The session persists in `HRM_DATA_DIR` between invocations.

use std::process::ExitCode;

use anyhow::{Context, bail};
use hrm_portal::forms::LoginForm;
use hrm_portal::{PortalConfig, open_shell, routes};

const USAGE: &str = "usage: hrm-portal <login EMAIL PASSWORD | logout | whoami | open PATH | routes>";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = PortalConfig::from_env().context("invalid configuration")?;
    hrm_observability::init(config.log_format);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let shell = open_shell(&config)?;
    tracing::debug!(data_dir = ?config.data_dir, "portal shell ready");

    match args.as_slice() {
        ["login", email, password] => {
            let submission = shell.submit_login(&LoginForm::new(*email, *password)).await;
            println!("{}", submission.outcome.message);
            match submission.next {
                Some(next) => {
                    println!("{}", serde_json::to_string(&next)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => Ok(ExitCode::FAILURE),
            }
        }
        ["logout"] => {
            let next = shell.logout();
            println!("{}", serde_json::to_string(&next)?);
            Ok(ExitCode::SUCCESS)
        }
        ["whoami"] => match shell.current_user() {
            Some(identity) => {
                println!("{}", serde_json::to_string_pretty(&identity)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("not signed in");
                Ok(ExitCode::FAILURE)
            }
        },
        ["open", path] => {
            let navigation = shell.navigate(path);
            println!("{}", serde_json::to_string(&navigation)?);
            Ok(ExitCode::SUCCESS)
        }
        ["routes"] => {
            for (pattern, guard) in routes::table() {
                let access = match guard.map(|g| g.required_role) {
                    None => "public".to_string(),
                    Some(None) => "signed in".to_string(),
                    Some(Some(role)) => format!("role {role} ({})", role.description()),
                };
                println!("{pattern:<40} {access}");
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => bail!("{USAGE}"),
    }
}

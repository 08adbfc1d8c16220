use crate::aws_config::{ConfigFile, SsoSession};
use crate::error::{ProfError, Result};
use crate::sso::{AccountRole, SsoDirectory};
use crate::ui::{Column, TablePicker};
use std::path::PathBuf;

/// Interactively create (or refresh) one profile for an account/role
/// pair reachable under a configured SSO session.
pub async fn execute(config: Option<PathBuf>, session_arg: Option<String>) -> Result<()> {
    let mut cf = super::load_config(config)?;

    let Some(session) = pick_session(&cf, session_arg)? else {
        eprintln!("Selection cancelled.");
        return Ok(());
    };

    let directory = SsoDirectory::connect(&session).await?;
    let pairs = directory.account_roles().await?;
    if pairs.is_empty() {
        return Err(ProfError::Config(format!(
            "no accounts visible under sso-session '{}'",
            session.name
        )));
    }

    let Some(chosen) = pick_account_role(&pairs)? else {
        eprintln!("Selection cancelled.");
        return Ok(());
    };

    let profile_name = format!("{}_{}", chosen.account_name, chosen.role_name);
    let profile = cf.profile(&profile_name);
    profile.sso_session = session.name.clone();
    profile.account_name = chosen.account_name.clone();
    profile.account_id = chosen.account_id.clone();
    profile.role_name = chosen.role_name.clone();

    cf.update()?;

    println!("[profile {}]", profile_name);
    println!("sso_session = {}", session.name);
    println!("sso_account_id = {}", chosen.account_id);
    println!("sso_role_name = {}", chosen.role_name);
    Ok(())
}

/// Resolve the SSO session to work with: the --session argument if
/// given, the only configured session if there is exactly one, or a
/// picker otherwise. `None` means the user cancelled.
fn pick_session(cf: &ConfigFile, arg: Option<String>) -> Result<Option<SsoSession>> {
    if let Some(name) = arg {
        return cf
            .sso_sessions
            .lookup(&name)
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                ProfError::Config(format!(
                    "sso-session '{}' not found in {}",
                    name,
                    cf.path().display()
                ))
            });
    }

    let mut sessions: Vec<&SsoSession> = cf.sso_sessions.as_list();
    sessions.sort_by(|a, b| a.name.cmp(&b.name));

    match sessions.len() {
        0 => Err(ProfError::Config(format!(
            "no [sso-session] sections in {}; create one with: aws configure sso-session",
            cf.path().display()
        ))),
        1 => Ok(Some(sessions[0].clone())),
        _ => {
            let widths = cf.sso_sessions.column_widths();
            let columns = vec![
                Column::new("Name", widths.get("name").copied().unwrap_or(0)),
                Column::new("Start URL", widths.get("sso_start_url").copied().unwrap_or(0)),
                Column::new("Region", widths.get("sso_region").copied().unwrap_or(0)),
            ];
            let rows = sessions
                .iter()
                .map(|s| vec![s.name.clone(), s.start_url.clone(), s.region.clone()])
                .collect();

            let picked = TablePicker::new("SSO sessions", columns, rows).pick()?;
            Ok(picked.map(|i| sessions[i].clone()))
        }
    }
}

/// Pick one account/role pair. `None` means the user cancelled.
fn pick_account_role(pairs: &[AccountRole]) -> Result<Option<&AccountRole>> {
    let mut name_w = 0;
    let mut email_w = 0;
    let mut id_w = 0;
    let mut role_w = 0;
    for pair in pairs {
        name_w = name_w.max(pair.account_name.len());
        email_w = email_w.max(pair.email_address.len());
        id_w = id_w.max(pair.account_id.len());
        role_w = role_w.max(pair.role_name.len());
    }

    let columns = vec![
        Column::new("Name", name_w),
        Column::new("Email Address", email_w),
        Column::new("ID", id_w),
        Column::new("Role", role_w),
    ];
    let rows = pairs
        .iter()
        .map(|p| {
            vec![
                p.account_name.clone(),
                p.email_address.clone(),
                p.account_id.clone(),
                p.role_name.clone(),
            ]
        })
        .collect();

    let picked = TablePicker::new("Accounts", columns, rows).pick()?;
    Ok(picked.map(|i| &pairs[i]))
}

use crate::error::{ProfError, Result};
use crate::sso::SsoDirectory;
use std::path::PathBuf;

/// Walk every configured SSO session (or just `--session`), enumerate
/// all reachable account/role pairs, and upsert one profile per pair.
/// All mutations land in a single config-file write at the end.
pub async fn execute(config: Option<PathBuf>, session_arg: Option<String>) -> Result<()> {
    let mut cf = super::load_config(config)?;

    let mut session_names: Vec<String> = cf.sso_sessions.as_map().keys().cloned().collect();
    session_names.sort_unstable();

    if let Some(name) = session_arg {
        if !session_names.contains(&name) {
            return Err(ProfError::Config(format!(
                "sso-session '{}' not found in {}",
                name,
                cf.path().display()
            )));
        }
        session_names = vec![name];
    }

    if session_names.is_empty() {
        return Err(ProfError::Config(format!(
            "no [sso-session] sections in {}; create one with: aws configure sso-session",
            cf.path().display()
        )));
    }

    let mut total = 0;
    for name in &session_names {
        // lookup cannot miss here; names came from the map itself.
        let Some(session) = cf.sso_sessions.lookup(name).cloned() else {
            continue;
        };

        let directory = SsoDirectory::connect(&session).await?;
        let pairs = directory.account_roles().await?;

        for pair in &pairs {
            let profile_name = format!("{}_{}", pair.account_name, pair.role_name);
            let profile = cf.profile(&profile_name);
            profile.sso_session = session.name.clone();
            profile.account_name = pair.account_name.clone();
            profile.account_id = pair.account_id.clone();
            profile.role_name = pair.role_name.clone();
        }

        println!(
            "Synced {} account/role pairs from sso-session '{}'",
            pairs.len(),
            name
        );
        total += pairs.len();
    }

    cf.update()?;
    println!("Updated {} ({} profiles)", cf.path().display(), total);
    Ok(())
}

use crate::aws_config::Profile;
use crate::error::{ProfError, Result};
use crate::ui::{Column, TablePicker};
use std::path::PathBuf;

/// Pick an existing profile and print a shell-evaluable AWS_PROFILE
/// export. The picker renders on stderr, so stdout carries only the
/// export line.
pub fn execute(config: Option<PathBuf>) -> Result<()> {
    let cf = super::load_config(config)?;

    let mut profiles: Vec<&Profile> = cf.profiles.as_list();
    profiles.sort_by(|a, b| a.name.cmp(&b.name));

    if profiles.is_empty() {
        return Err(ProfError::Config(format!(
            "no profiles in {}; create one with: awsprof init",
            cf.path().display()
        )));
    }

    let widths = cf.profiles.column_widths();
    let name_width = profiles.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let columns = vec![
        Column::new("Profile", name_width),
        Column::new("SSO Session", widths.get("sso_session").copied().unwrap_or(0)),
        Column::new("Account ID", widths.get("account_id").copied().unwrap_or(0)),
        Column::new("Role Name", widths.get("role_name").copied().unwrap_or(0)),
    ];
    let rows = profiles
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.sso_session.clone(),
                p.account_id.clone(),
                p.role_name.clone(),
            ]
        })
        .collect();

    match TablePicker::new("Profiles", columns, rows).pick()? {
        Some(i) => {
            println!("export AWS_PROFILE={}", profiles[i].name);
            Ok(())
        }
        None => {
            eprintln!("Selection cancelled.");
            Ok(())
        }
    }
}

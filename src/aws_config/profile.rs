use crate::aws_config::collection::ConfigEntity;
use crate::error::Result;
use ini::Properties;

/// A named AWS CLI profile pointing at an SSO account/role pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// Name of the [sso-session] this profile authenticates through.
    pub sso_session: String,
    /// Display-only; populated from SSO account lookups, never persisted.
    pub account_name: String,
    pub account_id: String,
    pub role_name: String,
}

impl ConfigEntity for Profile {
    const KIND: &'static str = "profile";

    fn with_name(name: &str) -> Self {
        Profile {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read_properties(&mut self, props: &Properties) -> Result<()> {
        self.sso_session = props.get("sso_session").unwrap_or_default().to_string();
        self.account_id = props.get("sso_account_id").unwrap_or_default().to_string();
        self.role_name = props.get("sso_role_name").unwrap_or_default().to_string();
        Ok(())
    }

    fn column_widths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("account_name", self.account_name.len()),
            ("sso_session", self.sso_session.len()),
            ("account_id", self.account_id.len()),
            ("role_name", self.role_name.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_properties() {
        let mut props = Properties::new();
        props.insert("sso_session", "work");
        props.insert("sso_account_id", "111122223333");
        props.insert("sso_role_name", "AdministratorAccess");
        props.insert("region", "eu-west-1"); // unrecognized, ignored

        let mut profile = Profile::with_name("acct1_admin");
        profile.read_properties(&props).unwrap();

        assert_eq!(profile.name, "acct1_admin");
        assert_eq!(profile.sso_session, "work");
        assert_eq!(profile.account_id, "111122223333");
        assert_eq!(profile.role_name, "AdministratorAccess");
        assert!(profile.account_name.is_empty());
    }

    #[test]
    fn test_missing_keys_stay_zero() {
        let props = Properties::new();
        let mut profile = Profile::with_name("bare");
        profile.read_properties(&props).unwrap();
        assert_eq!(profile, Profile::with_name("bare"));
    }
}

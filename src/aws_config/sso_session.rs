use crate::aws_config::collection::ConfigEntity;
use crate::error::Result;
use ini::Properties;

/// A configured [sso-session] block: the SSO portal a set of profiles
/// authenticates through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsoSession {
    pub name: String,
    pub start_url: String,
    pub region: String,
    pub account_id: String,
    pub role_name: String,
    /// Serialized as a comma-joined list.
    pub registration_scopes: Vec<String>,
}

impl SsoSession {
    pub fn scopes_joined(&self) -> String {
        self.registration_scopes.join(",")
    }
}

impl ConfigEntity for SsoSession {
    const KIND: &'static str = "sso-session";

    fn with_name(name: &str) -> Self {
        SsoSession {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read_properties(&mut self, props: &Properties) -> Result<()> {
        self.start_url = props.get("sso_start_url").unwrap_or_default().to_string();
        self.region = props.get("sso_region").unwrap_or_default().to_string();
        self.account_id = props.get("sso_account_id").unwrap_or_default().to_string();
        self.role_name = props.get("sso_role_name").unwrap_or_default().to_string();
        self.registration_scopes = props
            .get("sso_registration_scopes")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }

    fn column_widths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("name", self.name.len()),
            ("sso_start_url", self.start_url.len()),
            ("sso_region", self.region.len()),
            ("sso_account_id", self.account_id.len()),
            ("sso_role_name", self.role_name.len()),
            ("sso_registration_scopes", self.scopes_joined().len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_properties() {
        let mut props = Properties::new();
        props.insert("sso_start_url", "https://corp.awsapps.com/start");
        props.insert("sso_region", "us-east-1");
        props.insert("sso_registration_scopes", "sso:account:access, foo:bar");

        let mut session = SsoSession::with_name("work");
        session.read_properties(&props).unwrap();

        assert_eq!(session.start_url, "https://corp.awsapps.com/start");
        assert_eq!(session.region, "us-east-1");
        assert!(session.account_id.is_empty());
        assert!(session.role_name.is_empty());
        assert_eq!(
            session.registration_scopes,
            vec!["sso:account:access".to_string(), "foo:bar".to_string()]
        );
        assert_eq!(session.scopes_joined(), "sso:account:access,foo:bar");
    }

    #[test]
    fn test_empty_scopes() {
        let props = Properties::new();
        let mut session = SsoSession::with_name("work");
        session.read_properties(&props).unwrap();
        assert!(session.registration_scopes.is_empty());
        assert_eq!(session.scopes_joined(), "");
    }
}

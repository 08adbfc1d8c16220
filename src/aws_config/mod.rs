//! Domain model and merge engine for the AWS shared config file
//! (`~/.aws/config`).
//!
//! The file is parsed once into typed entities (profiles, SSO sessions,
//! services) held in per-kind registries; callers mutate entities through
//! live handles and [`ConfigFile::update`] reconciles the full in-memory
//! state back into the underlying INI document, preserving every section
//! and key it does not own.

mod collection;
mod profile;
mod section;
mod service;
mod sso_session;

pub use collection::{ConfigEntity, SectionMap};
pub use profile::Profile;
pub use section::{classify, SectionKind};
pub use service::Service;
pub use sso_session::SsoSession;

use crate::error::{ProfError, Result};
use ini::{Ini, Properties};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolve the shared config file path: `AWS_CONFIG_FILE` if set,
/// otherwise `~/.aws/config`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("AWS_CONFIG_FILE") {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".aws").join("config"))
        .ok_or_else(|| ProfError::Config("could not determine home directory".to_string()))
}

/// The AWS shared config file, loaded into typed entity registries.
///
/// Single-threaded and synchronous; callers sharing one instance across
/// tasks must serialize access themselves.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    ini: Ini,
    pub profiles: SectionMap<Profile>,
    pub sso_sessions: SectionMap<SsoSession>,
    pub services: SectionMap<Service>,
}

impl ConfigFile {
    /// Read and parse the backing file, then index every recognized
    /// section into its entity registry. Sections of unknown kind and
    /// the general (sectionless) block are preserved in the document
    /// but not modeled.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ini = Ini::load_from_file(&path).map_err(|e| match e {
            ini::Error::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                ProfError::FileNotFound(path.clone())
            }
            ini::Error::Io(err) => ProfError::Io(err),
            ini::Error::Parse(err) => ProfError::Parse(err.to_string()),
        })?;

        let mut config = ConfigFile {
            path,
            ini,
            profiles: SectionMap::new(),
            sso_sessions: SectionMap::new(),
            services: SectionMap::new(),
        };
        config.index_sections()?;
        Ok(config)
    }

    fn index_sections(&mut self) -> Result<()> {
        let sections: Vec<(String, Properties)> = self
            .ini
            .iter()
            .map(|(name, props)| (name.unwrap_or("").to_string(), props.clone()))
            .collect();

        for (raw, props) in &sections {
            let (kind, name) = classify(raw);
            match kind {
                SectionKind::Unused | SectionKind::Other => continue,
                SectionKind::Profile => self.profiles.new_from_section(&name, props)?,
                SectionKind::SsoSession => self.sso_sessions.new_from_section(&name, props)?,
                SectionKind::Service => self.services.new_from_section(&name, props)?,
            }
        }

        tracing::debug!(
            profiles = self.profiles.len(),
            sso_sessions = self.sso_sessions.len(),
            services = self.services.len(),
            "loaded {}",
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The profile under `name`, created with only its name set if absent.
    pub fn profile(&mut self, name: &str) -> &mut Profile {
        self.profiles.lookup_or_create(name)
    }

    /// The SSO session under `name`, created if absent.
    pub fn sso_session(&mut self, name: &str) -> &mut SsoSession {
        self.sso_sessions.lookup_or_create(name)
    }

    /// The service under `name`, created if absent.
    pub fn service(&mut self, name: &str) -> &mut Service {
        self.services.lookup_or_create(name)
    }

    /// Reconcile the in-memory entities into the INI document and write
    /// the whole file back to its original path.
    ///
    /// A profile without a physical section is created by cloning every
    /// key of the `[default]` section first, so new profiles inherit
    /// global defaults (output format, pager, ...). Only the three
    /// `sso_*` keys this tool owns are then overwritten; everything else
    /// on the section is left untouched. Service sections are never
    /// written back.
    ///
    /// The write is atomic: the serialized document goes to a temp file
    /// in the same directory, is fsynced, and renamed over the original.
    pub fn update(&mut self) -> Result<()> {
        // Every brand-new profile needs the [default] baseline; check
        // them all before touching the document so a failed update
        // mutates nothing.
        let mut missing: Vec<&str> = self
            .profiles
            .as_map()
            .values()
            .filter(|p| {
                self.ini
                    .section(Some(format!("{} {}", Profile::KIND, p.name)))
                    .is_none()
            })
            .map(|p| p.name.as_str())
            .collect();
        missing.sort_unstable();

        let default_keys: Vec<(String, String)> = match self.ini.section(Some("default")) {
            Some(props) => props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            None if !missing.is_empty() => {
                return Err(ProfError::NoDefaultSection(missing.join(", ")));
            }
            None => Vec::new(),
        };

        for profile in self.profiles.as_map().values() {
            let section = format!("{} {}", Profile::KIND, profile.name);
            if self.ini.section(Some(section.as_str())).is_none() {
                for (key, value) in &default_keys {
                    self.ini
                        .set_to(Some(section.as_str()), key.clone(), value.clone());
                }
            }
            self.ini.set_to(
                Some(section.as_str()),
                "sso_session".to_string(),
                profile.sso_session.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_account_id".to_string(),
                profile.account_id.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_role_name".to_string(),
                profile.role_name.clone(),
            );
        }

        for session in self.sso_sessions.as_map().values() {
            let section = format!("{} {}", SsoSession::KIND, session.name);
            self.ini.set_to(
                Some(section.as_str()),
                "sso_start_url".to_string(),
                session.start_url.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_region".to_string(),
                session.region.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_account_id".to_string(),
                session.account_id.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_role_name".to_string(),
                session.role_name.clone(),
            );
            self.ini.set_to(
                Some(section.as_str()),
                "sso_registration_scopes".to_string(),
                session.scopes_joined(),
            );
        }

        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let mut buf = Vec::new();
        self.ini
            .write_to(&mut buf)
            .map_err(|e| ProfError::Write(e.to_string()))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ProfError::Write(format!("invalid path: {}", self.path.display())))?;
        let tmp = self
            .path
            .with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

        let write_tmp = |buf: &[u8]| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(buf)?;
            file.sync_all()
        };
        write_tmp(&buf).map_err(|e| ProfError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ProfError::Write(e.to_string()))?;

        tracing::debug!("wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config");
        fs::write(&path, contents).unwrap();
        path
    }

    const SAMPLE: &str = "\
[default]
region = us-west-2
output = json

[profile dev]
sso_session = work
sso_account_id = 111122223333
sso_role_name = Developer
region = eu-west-1

[sso-session work]
sso_start_url = https://corp.awsapps.com/start
sso_region = us-east-1

[service s3]
endpoint_url = http://localhost:9000
";

    #[test]
    fn test_load_indexes_all_kinds() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);
        let cf = ConfigFile::load(&path).unwrap();

        // [default] is a bare header, modeled as profile "default".
        assert_eq!(cf.profiles.len(), 2);
        assert_eq!(cf.sso_sessions.len(), 1);
        assert_eq!(cf.services.len(), 1);

        let dev = cf.profiles.lookup("dev").unwrap();
        assert_eq!(dev.sso_session, "work");
        assert_eq!(dev.account_id, "111122223333");
        assert_eq!(dev.role_name, "Developer");

        let work = cf.sso_sessions.lookup("work").unwrap();
        assert_eq!(work.start_url, "https://corp.awsapps.com/start");
        assert_eq!(work.region, "us-east-1");
        assert!(work.account_id.is_empty());
        assert!(work.role_name.is_empty());
        assert!(work.registration_scopes.is_empty());

        assert_eq!(cf.services.lookup("s3").unwrap().name, "s3");
    }

    #[test]
    fn test_service_accessor_creates_stub() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[default]\noutput = json\n");
        let mut cf = ConfigFile::load(&path).unwrap();

        assert!(cf.services.is_empty());
        assert_eq!(cf.service("ec2").name, "ec2");
        assert_eq!(cf.services.len(), 1);

        // Services are never written back.
        cf.update().unwrap();
        let reloaded = Ini::load_from_file(&path).unwrap();
        assert!(reloaded.section(Some("service ec2")).is_none());
    }

    #[test]
    fn test_shadowed_section_last_wins() {
        // The config format permits duplicate section headers; the last
        // occurrence shadows earlier ones.
        let dir = TempDir::new().unwrap();
        let contents = "\
[default]
output = json

[profile dev]
sso_session = work
sso_account_id = 111111111111
sso_role_name = First

[profile dev]
sso_session = work
sso_account_id = 222222222222
sso_role_name = Second
";
        let path = write_config(&dir, contents);
        let cf = ConfigFile::load(&path).unwrap();

        assert_eq!(cf.profiles.len(), 2); // default + dev
        let dev = cf.profiles.lookup("dev").unwrap();
        assert_eq!(dev.account_id, "222222222222");
        assert_eq!(dev.role_name, "Second");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigFile::load(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ProfError::FileNotFound(_)));
    }

    #[test]
    fn test_update_without_mutation_preserves_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let mut cf = ConfigFile::load(&path).unwrap();
        cf.update().unwrap();

        let reloaded = Ini::load_from_file(&path).unwrap();

        let default = reloaded.section(Some("default")).unwrap();
        assert_eq!(default.get("region"), Some("us-west-2"));
        assert_eq!(default.get("output"), Some("json"));

        // Keys the tool owns get rewritten with their loaded values;
        // keys it does not own survive untouched.
        let dev = reloaded.section(Some("profile dev")).unwrap();
        assert_eq!(dev.get("sso_session"), Some("work"));
        assert_eq!(dev.get("sso_account_id"), Some("111122223333"));
        assert_eq!(dev.get("sso_role_name"), Some("Developer"));
        assert_eq!(dev.get("region"), Some("eu-west-1"));

        let work = reloaded.section(Some("sso-session work")).unwrap();
        assert_eq!(
            work.get("sso_start_url"),
            Some("https://corp.awsapps.com/start")
        );
        assert_eq!(work.get("sso_region"), Some("us-east-1"));

        // Unmodeled service keys round-trip verbatim.
        let s3 = reloaded.section(Some("service s3")).unwrap();
        assert_eq!(s3.get("endpoint_url"), Some("http://localhost:9000"));
    }

    #[test]
    fn test_new_profile_inherits_default_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let mut cf = ConfigFile::load(&path).unwrap();
        let profile = cf.profile("acct2_admin");
        profile.sso_session = "work".to_string();
        profile.account_id = "444455556666".to_string();
        profile.role_name = "AdministratorAccess".to_string();
        cf.update().unwrap();

        let reloaded = Ini::load_from_file(&path).unwrap();
        let created = reloaded.section(Some("profile acct2_admin")).unwrap();
        // Baseline cloned from [default]...
        assert_eq!(created.get("region"), Some("us-west-2"));
        assert_eq!(created.get("output"), Some("json"));
        // ...then the three owned keys written on top.
        assert_eq!(created.get("sso_session"), Some("work"));
        assert_eq!(created.get("sso_account_id"), Some("444455556666"));
        assert_eq!(created.get("sso_role_name"), Some("AdministratorAccess"));
    }

    #[test]
    fn test_new_profile_without_default_section_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let contents = "\
[sso-session work]
sso_start_url = https://corp.awsapps.com/start
sso_region = us-east-1
";
        let path = write_config(&dir, contents);

        let mut cf = ConfigFile::load(&path).unwrap();
        cf.profile("acct1_admin").sso_session = "work".to_string();

        let err = cf.update().unwrap_err();
        assert!(matches!(err, ProfError::NoDefaultSection(_)));

        // The on-disk file must be untouched.
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_live_handle_mutation_is_written_back() {
        // End-to-end: session lookup, profile creation, update.
        let dir = TempDir::new().unwrap();
        let contents = "\
[default]
output = json

[sso-session work]
sso_start_url = https://x
sso_region = us-east-1
";
        let path = write_config(&dir, contents);
        let mut cf = ConfigFile::load(&path).unwrap();

        let session = cf.sso_session("work");
        assert_eq!(session.start_url, "https://x");
        assert_eq!(session.region, "us-east-1");

        let profile = cf.profile("acct1_admin");
        profile.sso_session = "work".to_string();
        profile.account_id = "111".to_string();
        profile.role_name = "admin".to_string();
        cf.update().unwrap();

        let reloaded = Ini::load_from_file(&path).unwrap();
        let created = reloaded.section(Some("profile acct1_admin")).unwrap();
        assert_eq!(created.get("sso_session"), Some("work"));
        assert_eq!(created.get("sso_account_id"), Some("111"));
        assert_eq!(created.get("sso_role_name"), Some("admin"));
    }

    #[test]
    fn test_update_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let mut cf = ConfigFile::load(&path).unwrap();
        cf.update().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        cf.update().unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_scopes_round_trip() {
        let dir = TempDir::new().unwrap();
        let contents = "\
[default]
output = json

[sso-session work]
sso_start_url = https://x
sso_region = us-east-1
sso_registration_scopes = sso:account:access,other:scope
";
        let path = write_config(&dir, contents);

        let mut cf = ConfigFile::load(&path).unwrap();
        assert_eq!(
            cf.sso_session("work").registration_scopes,
            vec!["sso:account:access".to_string(), "other:scope".to_string()]
        );
        cf.update().unwrap();

        let reloaded = Ini::load_from_file(&path).unwrap();
        let work = reloaded.section(Some("sso-session work")).unwrap();
        assert_eq!(
            work.get("sso_registration_scopes"),
            Some("sso:account:access,other:scope")
        );
    }
}

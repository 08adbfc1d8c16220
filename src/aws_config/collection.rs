use crate::error::{ProfError, Result};
use ini::Properties;
use std::collections::HashMap;

/// A typed entity backed by one config-file section.
pub trait ConfigEntity {
    /// Section-header prefix for this kind, e.g. `"profile"`.
    const KIND: &'static str;

    /// Construct a zero-value entity carrying only its name.
    fn with_name(name: &str) -> Self;

    fn name(&self) -> &str;

    /// Populate fields from the raw key/value pairs of a section.
    /// Unrecognized keys are ignored, missing keys stay at their zero value.
    fn read_properties(&mut self, props: &Properties) -> Result<()>;

    /// Current display width of every tabular field.
    fn column_widths(&self) -> Vec<(&'static str, usize)>;
}

/// Keyed registry of one entity kind, with a running max of every
/// field's display width for tabular rendering.
///
/// Widths are accumulated at section-load time only; mutating an entity
/// afterwards does not update them.
#[derive(Debug, Default)]
pub struct SectionMap<T> {
    entries: HashMap<String, T>,
    col_widths: HashMap<&'static str, usize>,
}

impl<T: ConfigEntity> SectionMap<T> {
    pub fn new() -> Self {
        SectionMap {
            entries: HashMap::new(),
            col_widths: HashMap::new(),
        }
    }

    /// Build an entity from a raw section and store it under `name`.
    /// A name seen before is overwritten; the config format permits
    /// shadowed sections and the last occurrence wins.
    pub fn new_from_section(&mut self, name: &str, props: &Properties) -> Result<()> {
        let mut entity = T::with_name(name);
        entity
            .read_properties(props)
            .map_err(|e| ProfError::Mapping {
                section: format!("{} {}", T::KIND, name),
                reason: e.to_string(),
            })?;

        for (col, width) in entity.column_widths() {
            let max = self.col_widths.entry(col).or_insert(0);
            if *max < width {
                *max = width;
            }
        }

        self.entries.insert(entity.name().to_string(), entity);
        Ok(())
    }

    /// Fetch an existing entity, never constructing one.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Fetch an entity, constructing and storing a zero-value one with
    /// only its name set if absent. Returns a live handle; field
    /// mutations are visible to later `ConfigFile::update` calls.
    pub fn lookup_or_create(&mut self, name: &str) -> &mut T {
        self.entries
            .entry(name.to_string())
            .or_insert_with(|| T::with_name(name))
    }

    /// All entities, in no defined order. Callers needing stable output
    /// sort by name at the boundary.
    pub fn as_list(&self) -> Vec<&T> {
        self.entries.values().collect()
    }

    pub fn as_map(&self) -> &HashMap<String, T> {
        &self.entries
    }

    /// Best-known max display width per field, as observed at load time.
    pub fn column_widths(&self) -> &HashMap<&'static str, usize> {
        &self.col_widths
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws_config::Profile;

    #[test]
    fn test_lookup_or_create_is_stable() {
        let mut map: SectionMap<Profile> = SectionMap::new();
        assert_eq!(map.len(), 0);

        map.lookup_or_create("dev").account_id = "111122223333".to_string();
        assert_eq!(map.len(), 1);

        // Second call returns the same logical entity, not a fresh one.
        let again = map.lookup_or_create("dev");
        assert_eq!(again.account_id, "111122223333");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_lookup_never_constructs() {
        let map: SectionMap<Profile> = SectionMap::new();
        assert!(map.lookup("missing").is_none());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_new_from_section_overwrites() {
        let mut map: SectionMap<Profile> = SectionMap::new();

        let mut first = Properties::new();
        first.insert("sso_account_id", "111111111111");
        map.new_from_section("dev", &first).unwrap();

        let mut second = Properties::new();
        second.insert("sso_account_id", "222222222222");
        map.new_from_section("dev", &second).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup("dev").unwrap().account_id, "222222222222");
    }

    #[test]
    fn test_column_widths_track_load_time_max() {
        let mut map: SectionMap<Profile> = SectionMap::new();

        let mut props = Properties::new();
        props.insert("sso_role_name", "ReadOnly");
        map.new_from_section("a", &props).unwrap();

        let mut props = Properties::new();
        props.insert("sso_role_name", "AdministratorAccess");
        map.new_from_section("b", &props).unwrap();

        let widths = map.column_widths();
        assert_eq!(widths["role_name"], "AdministratorAccess".len());

        // Widths are monotone; a shorter later entry does not shrink them.
        let mut props = Properties::new();
        props.insert("sso_role_name", "Dev");
        map.new_from_section("c", &props).unwrap();
        assert_eq!(map.column_widths()["role_name"], "AdministratorAccess".len());
    }
}

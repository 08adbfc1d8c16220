use crate::aws_config::collection::ConfigEntity;
use crate::error::Result;
use ini::Properties;

/// A [service] block. Only the name is modeled; per-service key mapping
/// is unimplemented and service sections are never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub name: String,
}

impl ConfigEntity for Service {
    const KIND: &'static str = "service";

    fn with_name(name: &str) -> Self {
        Service {
            name: name.to_string(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read_properties(&mut self, _props: &Properties) -> Result<()> {
        Ok(())
    }

    fn column_widths(&self) -> Vec<(&'static str, usize)> {
        vec![("name", self.name.len())]
    }
}

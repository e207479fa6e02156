//! Service identity shared by bootstrap, health and logging.

/// Static identity of a Hill90 service.
///
/// Each service crate exposes one of these as a constant; it is copied into the
/// app factory so every worker answers health checks with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Short name reported in the health body (e.g. `"api"`)
    pub name: &'static str,
    /// Human-readable name used in the startup line (e.g. `"API"`)
    pub display_name: &'static str,
    /// Port used when `PORT` is absent or unparseable
    pub default_port: u16,
}

impl ServiceDescriptor {
    pub const fn new(name: &'static str, display_name: &'static str, default_port: u16) -> Self {
        Self {
            name,
            display_name,
            default_port,
        }
    }

    /// Startup confirmation emitted once the listener is bound.
    pub fn startup_message(&self, port: u16) -> String {
        format!(
            "Hill90 {} service listening on port {}",
            self.display_name, port
        )
    }
}

use split_dns_application::use_cases::HandleDnsQueryUseCase;
use split_dns_domain::Config;
use split_dns_infrastructure::dns::{build_resolver, build_routing_table};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    /// Build the routing table, strategies and query router from
    /// configuration. Everything constructed here is immutable for the
    /// process lifetime.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(config.dns.timeout_ms());

        let table = build_routing_table(&config.routes, timeout)?;
        info!(routes = table.len(), "Routing table ready");

        let mut use_case = HandleDnsQueryUseCase::new(table);

        if let Some(default_config) = &config.dns.default_resolver {
            let default = build_resolver(default_config, timeout)?;
            info!("Default resolver configured");
            use_case = use_case.with_default_resolver(default);
        }

        Ok(Self {
            handler_use_case: Arc::new(use_case),
        })
    }
}

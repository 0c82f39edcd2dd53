//! FQDN exclusion filtering shared by the input formatters

use crate::error::RenderError;
use foreman_client::HostEntry;
use regex::Regex;

/// Compile exclusion patterns up front so a malformed pattern fails at
/// construction instead of once per host.
pub(crate) fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, RenderError> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(RenderError::from))
        .collect()
}

/// The host's monitorable FQDNs: its canonical FQDN list minus any entry
/// matching an exclusion pattern.
pub(crate) fn monitored_fqdns(host: &HostEntry, exclude: &[Regex]) -> Vec<String> {
    host.fqdns()
        .into_iter()
        .filter(|fqdn| !exclude.iter().any(|pattern| pattern.is_match(fqdn)))
        .collect()
}

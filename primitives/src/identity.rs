use {once_cell::sync::Lazy, regex::Regex};

/// Heading of the issue template field where contributors paste the
/// account that should receive the reward.
static PUBLIC_ADDRESS: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"### Public Address\s*\n([A-Za-z0-9]+)")
    .expect("static regex is valid")
});

/// Pulls the contributor's public address out of a GitHub issue body
/// created from the bounty issue template.
pub fn extract_address(issue_body: &str) -> Option<&str> {
  PUBLIC_ADDRESS
    .captures(issue_body)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str())
}

/// One release line item from the ticket's release field, split out of a raw
/// `"<product name> <version>"` entry at the last space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub product: String,
    pub version: String,
}

impl ReleaseEntry {
    /// Returns `None` when the name has no space, no product prefix, or no
    /// version suffix. Product names may themselves contain spaces, which is
    /// why the split happens at the last one.
    pub fn parse(name: &str) -> Option<Self> {
        let (product, version) = name.rsplit_once(' ')?;
        let product = product.trim();
        let version = version.trim();
        if product.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self {
            product: product.to_lowercase(),
            version: version.to_string(),
        })
    }

    pub fn release_branch(&self) -> String {
        format!("release/{}", self.version)
    }
}

/// Domain view of a fetched release ticket: the issue key and the raw names
/// of its release-field entries, in ticket order.
#[derive(Debug, Clone)]
pub struct ReleaseTicket {
    pub key: String,
    pub release_names: Vec<String>,
}

//! URL decomposition
//!
//! Splits arbitrary text into URL components following the generic URI grammar.
//! Nothing here fails: text that does not look like a URL simply ends up with
//! empty components (usually everything lands in `path`).

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlComponents {
    /// Lower-cased scheme, empty when absent or syntactically invalid
    pub scheme: String,
    /// host[:port] with any user-info removed
    pub authority: String,
    /// All authority labels except the last two
    pub subdomain_labels: Vec<String>,
    /// The last two authority labels (fewer for short authorities)
    pub domain_and_tld: Vec<String>,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl UrlComponents {
    /// Subdomain labels joined back with dots.
    pub fn subdomain(&self) -> String {
        self.subdomain_labels.join(".")
    }

    /// Last dot-separated label of the authority, or the whole authority when it has no dots.
    pub fn last_label(&self) -> &str {
        self.authority.rsplit('.').next().unwrap_or_default()
    }

    /// Reassemble the components with their markers.
    pub fn to_url_string(&self) -> String {
        let mut out = String::new();
        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }
        if !self.authority.is_empty() {
            out.push_str("//");
            out.push_str(&self.authority);
        }
        out.push_str(&self.path);
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

/// Decompose `raw` into its URL components.
pub fn decompose(raw: &str) -> UrlComponents {
    let (scheme, rest) = split_scheme(raw);

    let (rest, fragment) = match rest.split_once('#') {
        Some((before, fragment)) => (before, fragment),
        None => (rest, ""),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((before, query)) => (before, query),
        None => (rest, ""),
    };

    let (authority, path) = match rest.strip_prefix("//") {
        Some(hier) => {
            let end = hier.find('/').unwrap_or(hier.len());
            (strip_userinfo(&hier[..end]), &hier[end..])
        }
        None => ("", rest),
    };

    let (subdomain_labels, domain_and_tld) = split_labels(authority);

    log::trace!(
        "decomposed {:?}: scheme={:?} authority={:?} path={:?}",
        raw,
        scheme,
        authority,
        path
    );

    UrlComponents {
        scheme,
        authority: authority.to_string(),
        subdomain_labels,
        domain_and_tld,
        path: path.to_string(),
        query: query.to_string(),
        fragment: fragment.to_string(),
    }
}

/// Scheme is everything before the first `:` as long as no `/`, `?` or `#`
/// comes first and it is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn split_scheme(raw: &str) -> (String, &str) {
    if let Some(pos) = raw.find([':', '/', '?', '#']) {
        if raw[pos..].starts_with(':') && is_valid_scheme(&raw[..pos]) {
            return (raw[..pos].to_ascii_lowercase(), &raw[pos + 1..]);
        }
    }
    (String::new(), raw)
}

fn is_valid_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn strip_userinfo(authority: &str) -> &str {
    match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    }
}

fn split_labels(authority: &str) -> (Vec<String>, Vec<String>) {
    if authority.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let labels: Vec<&str> = authority.split('.').collect();
    let split_at = labels.len().saturating_sub(2);

    (
        labels[..split_at].iter().map(|s| s.to_string()).collect(),
        labels[split_at..].iter().map(|s| s.to_string()).collect(),
    )
}

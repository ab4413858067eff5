//! Plugin-to-route matching.
//!
//! A plugin attaches to a route when the plugin's name occurs *anywhere* in
//! the route's plugin spec. This is plain substring containment over the
//! whole string, not CSV or keyword parsing: a plugin named `jw` matches a
//! spec of `"jwt"`, and a plugin named `a` matches any spec containing the
//! letter `a`.

/// Returns true when `plugin_name` occurs as a substring of `spec`.
///
/// An empty `plugin_name` matches every spec; plugin names are validated
/// non-empty before they reach storage.
#[inline]
pub fn matches_by_substring(spec: &str, plugin_name: &str) -> bool {
    spec.contains(plugin_name)
}

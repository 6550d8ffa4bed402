//! Role id allocation.
//!
//! Ids are slugs of the role name: lowercased, with every run of characters
//! outside `[a-z0-9]` collapsed to a single `-`. Leading and trailing dashes
//! are kept, so `"Night Lead!"` becomes `"night-lead-"`.
//!
//! Collision policy: only an empty slug falls back to `role-<millis>`. Two
//! different names that slug to the same id are not disambiguated here; the
//! store treats the second create as a duplicate and skips it.

pub fn slugify(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_gap = false;
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Id for a new role named `name`, using `now_millis` when the slug is empty.
pub fn allocate_id(name: &str, now_millis: i64) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("role-{now_millis}")
    } else {
        slug
    }
}

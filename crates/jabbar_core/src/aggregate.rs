//! Merges the per-source actor collections into one deduplicated sequence.
//!
//! The merge is a pure fold over immutable inputs. Stargazers come first
//! (they carry the richest metadata), then watchers not already present,
//! then forkers not already present; presence is checked case-insensitively
//! on login. The first occurrence of an actor wins per field; later sources
//! only fill fields the earlier record lacks.

use std::collections::{HashMap, HashSet};

use crate::models::Actor;

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;

/// Logins excluded from the final report, compared case-insensitively.
///
/// Always contains the repository owner; callers may union in an explicit
/// comma-separated ignore list.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    logins: HashSet<String>,
}

impl IgnoreSet {
    /// Builds the set from the repository owner plus an optional
    /// comma-separated list of additional logins.
    pub fn new(owner: &str, extra: Option<&str>) -> Self {
        let mut logins = HashSet::new();
        logins.insert(owner.to_lowercase());
        if let Some(list) = extra {
            for login in list.split(',') {
                let login = login.trim();
                if !login.is_empty() {
                    logins.insert(login.to_lowercase());
                }
            }
        }
        Self { logins }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, login: &str) -> bool {
        self.logins.contains(&login.to_lowercase())
    }
}

/// Merges the three source collections into one deduplicated sequence,
/// dropping ignored logins.
///
/// Output order: stargazers in pagination order, then previously unseen
/// watchers, then previously unseen forkers. Within the result, logins are
/// unique case-insensitively.
pub fn merge(
    watchers: Vec<Actor>,
    stargazers: Vec<Actor>,
    forkers: Vec<Actor>,
    ignore: &IgnoreSet,
) -> Vec<Actor> {
    let mut merged: Vec<Actor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for actor in stargazers
        .into_iter()
        .chain(watchers)
        .chain(forkers)
    {
        if ignore.contains(&actor.login) {
            continue;
        }
        let key = actor.login.to_lowercase();
        match index.get(&key) {
            Some(&position) => enrich(&mut merged[position], actor),
            None => {
                index.insert(key, merged.len());
                merged.push(actor);
            }
        }
    }

    merged
}

/// Copies into `existing` only the fields it lacks; populated fields are
/// never overwritten by a later source.
fn enrich(existing: &mut Actor, incoming: Actor) {
    if existing.name.is_none() {
        existing.name = incoming.name;
    }
    if existing.company.is_none() {
        existing.company = incoming.company;
    }
    if existing.website_url.is_none() {
        existing.website_url = incoming.website_url;
    }
    if existing.url.is_none() {
        existing.url = incoming.url;
    }
    if existing.starred_at.is_none() {
        existing.starred_at = incoming.starred_at;
    }
    if existing.forked_at.is_none() {
        existing.forked_at = incoming.forked_at;
    }
    if existing.organizations.is_empty() && existing.organizations_total_count == 0 {
        existing.organizations = incoming.organizations;
        existing.organizations_total_count = incoming.organizations_total_count;
    }
}

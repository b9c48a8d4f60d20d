//! Derived views over the merged actor collection.
//!
//! Synthesis is read-only and deterministic: identical input produces
//! identical output, and the popular organization tally does not depend on
//! input actor order because it runs over ordered collections.

use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::IgnoreSet;
use crate::models::{Actor, OrgMembership};

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// An organization shared by two or more distinct actors, with the sorted
/// list of member logins. Built transiently during synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAggregate {
    pub login: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    /// Member actor logins, `@`-prefixed, deduplicated, sorted ascending.
    pub users: Vec<String>,
}

/// The report the CLI renders: affiliation partitions plus the popular
/// organization tally.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Individuals with at least one public org membership.
    pub org_affiliated: Vec<Actor>,
    /// Individuals with no public orgs but a stated company.
    pub company_only: Vec<Actor>,
    /// Individuals with neither.
    pub unaffiliated: Vec<Actor>,
    /// Actors that are themselves organizations (forkers only).
    pub organizations: Vec<Actor>,
    /// Organizations shared by two or more distinct actors, ordered by
    /// member count descending, then org login ascending.
    pub popular_orgs: Vec<OrgAggregate>,
}

/// Partitions the merged actors and tallies popular organizations.
///
/// Ignored logins are excluded before partitioning; merging already filters
/// them, so this second application is a no-op in the normal flow.
pub fn synthesize(actors: &[Actor], ignore: &IgnoreSet) -> Report {
    let mut report = Report::default();
    // org login (lowercased) -> (first-seen metadata, member logins)
    let mut tally: BTreeMap<String, (OrgMembership, BTreeSet<String>)> = BTreeMap::new();

    for actor in actors {
        if ignore.contains(&actor.login) {
            continue;
        }

        if actor.is_organization {
            report.organizations.push(actor.clone());
            continue;
        }

        if actor.organizations.is_empty() {
            if actor.company.is_some() {
                report.company_only.push(actor.clone());
            } else {
                report.unaffiliated.push(actor.clone());
            }
            continue;
        }

        for org in &actor.organizations {
            let entry = tally
                .entry(org.login.to_lowercase())
                .or_insert_with(|| (org.clone(), BTreeSet::new()));
            entry.1.insert(format!("@{}", actor.login));
        }
        report.org_affiliated.push(actor.clone());
    }

    let mut popular: Vec<OrgAggregate> = tally
        .into_values()
        .filter(|(_, users)| users.len() >= 2)
        .map(|(org, users)| OrgAggregate {
            login: org.login,
            name: org.name,
            description: org.description,
            website_url: org.website_url,
            users: users.into_iter().collect(),
        })
        .collect();
    popular.sort_by(|a, b| {
        b.users
            .len()
            .cmp(&a.users.len())
            .then_with(|| a.login.cmp(&b.login))
    });
    report.popular_orgs = popular;

    report
}
